mod home;
pub use home::Page as Home;

mod mortality;
pub use mortality::Page as Mortality;

mod countries;
pub use countries::Page as Countries;
