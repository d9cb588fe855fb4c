pub mod controls;
pub mod image_zoom;
pub mod project_nav;
pub mod slide_view;
