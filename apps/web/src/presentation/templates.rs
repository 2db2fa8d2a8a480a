// Template names used by the handlers

pub const INDEX: &str = "rango/index.html";
pub const ABOUT: &str = "rango/about.html";
pub const CATEGORY: &str = "rango/category.html";
pub const ADD_CATEGORY: &str = "rango/add_category.html";
pub const ADD_PAGE: &str = "rango/add_page.html";
pub const REGISTER: &str = "rango/register.html";
pub const LOGIN: &str = "rango/login.html";
pub const RESTRICTED: &str = "rango/restricted.html";
