use std::marker::PhantomData;

use crate::{api::Api, components::LocaleSelect, AppRouter};

use leptos::{component, prelude::*, view, IntoView};

#[component]
pub fn Page<A: Api>(#[prop(optional)] _ph: PhantomData<A>) -> impl IntoView {
    let api = expect_context::<A>();
    let router = expect_context::<AppRouter<A>>();
    let locale = api.locale();

    view! {
        <h1>"Mortality data"</h1>
        <p>
            {format!(
                "Showing data of {}, served from {}",
                locale.label(),
                locale.routing_prefix(),
            )}
        </p>
        <LocaleSelect<A> />
        <ul>
            <li>{router.anchor_mortality()}</li>
            <li>{router.anchor_countries()}</li>
        </ul>
    }
}
