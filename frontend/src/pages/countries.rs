use std::marker::PhantomData;

use crate::{
    api::{static_list_countries, Api, ApiError},
    api_resource, react_errors,
};

use common::CountrySummary;
use leptos::{component, prelude::*, view, IntoView};
use thaw::Spinner;

#[component]
pub fn Page<A: Api>(#[prop(optional)] _ph: PhantomData<A>) -> impl IntoView {
    let (countries, countries_err) = api_resource::<A, _, (), Box<[CountrySummary]>, ApiError>(
        || (),
        |api: &A, ()| static_list_countries(api),
    );

    // handle errors
    react_errors!(countries_err, ApiError);

    view! {
        <h1>"Countries"</h1>
        <Suspense fallback=|| {
            view! { <Spinner /> }
        }>
            {move || {
                countries
                    .get()
                    .map(|countries| {
                        view! {
                            <ul>
                                {countries
                                    .iter()
                                    .map(|country| {
                                        let region = country.region.clone().unwrap_or_default();
                                        view! { <li>{format!("{} {region}", country.nom)}</li> }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                    })
            }}
        </Suspense>
    }
}
