mod paginated;
pub use paginated::Paginated;

mod locale_select;
pub use locale_select::LocaleSelect;
