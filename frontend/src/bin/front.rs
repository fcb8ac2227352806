use frontend::{storage::stored_locale, App};
use leptos::{mount::mount_to_body, view};

fn main() {
    console_error_panic_hook::set_once();
    // read once, the api keeps its routing prefix for the whole session
    let locale = stored_locale();

    #[cfg(feature = "dummy")]
    let api = frontend::api::dummy::DummyApi::new(locale);
    #[cfg(not(feature = "dummy"))]
    let api = frontend::api::real::RealApi::for_locale(locale);

    mount_to_body(move || {
        view! { <App api /> }
    });
}
