// HTTP handlers

pub mod accounts;
pub mod rango;
