pub mod portal_page;

pub use portal_page::PortalPage;
