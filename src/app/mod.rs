pub mod dispatch;
pub mod render;
pub mod studio;
pub mod view;
