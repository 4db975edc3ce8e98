//! Catalog entities: recipes, their kinds, tags, authors and the inbound request shapes.

pub mod recipe;
pub mod request;
pub mod tag;
pub mod user;

pub use recipe::*;
pub use request::*;
pub use tag::*;
pub use user::*;

/// Column bounds enforced by storage.
pub mod limits {
    pub const TITLE_MAX: usize = 255;
    pub const DESCRIPTION_MAX: usize = 255;
    pub const INGREDIENTS_MAX: usize = 2000;
    pub const INSTRUCTIONS_MAX: usize = 4000;
    pub const TAG_NAME_MAX: usize = 50;
    pub const TAG_DESCRIPTION_MAX: usize = 200;
    pub const USERNAME_MAX: usize = 50;
    pub const PASSWORD_MAX: usize = 255;
    pub const DISPLAY_NAME_MAX: usize = 100;
}
