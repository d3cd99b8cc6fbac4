pub mod cart_panel;
pub mod footer;
pub mod header;
pub mod mobile_nav;
pub mod product_panel;

pub use cart_panel::CartPanel;
pub use footer::Footer;
pub use header::Header;
pub use mobile_nav::MobileNav;
pub use product_panel::ProductPanel;
