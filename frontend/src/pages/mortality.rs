use std::marker::PhantomData;

use crate::{
    api::{static_mortality_page, Api},
    components::Paginated,
};

use common::{MortalityQuery, MortalityRecord, DEFAULT_PAGE_SIZE};
use leptos::{component, prelude::*, view, IntoView};
use thaw::{Input, InputType};

/// Empty or unparsable input means every year.
fn parse_year(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_owned(), |value| value.to_string())
}

fn record_line(record: &MortalityRecord) -> String {
    let country = match (record.nom_pays(), record.id_pays()) {
        (Some(name), _) => name.to_owned(),
        (None, Some(id)) => format!("country #{id}"),
        (None, None) => "-".to_owned(),
    };
    format!(
        "{} | {country} | {}",
        or_dash(record.annee()),
        or_dash(record.valeur())
    )
}

#[component(transparent)]
fn Table<A: Api>(#[prop(optional)] _ph: PhantomData<A>, year: Option<u32>) -> impl IntoView {
    let api = PhantomData::<A>;
    view! {
        <Paginated
            api
            fetcher=move |api: &A, page| {
                let api: A = api.clone();
                let query = MortalityQuery::new(
                        u32::try_from(page).unwrap_or(u32::MAX),
                        DEFAULT_PAGE_SIZE,
                    )
                    .map(|query| query.with_year(year));
                async move { static_mortality_page(&api, query?).await }
            }
            key=|record: &MortalityRecord| record.key()
            item=|record: MortalityRecord| {
                view! { <li>{record_line(&record)}</li> }
            }
            empty="No records for this filter"
        />
    }
}

#[component]
pub fn Page<A: Api>(#[prop(optional)] _ph: PhantomData<A>) -> impl IntoView {
    let year_input = RwSignal::new(String::new());
    let year = Memo::new(move |_| parse_year(&year_input.get()));

    view! {
        <h1>"Mortality"</h1>
        <Input value=year_input placeholder="Year (empty for all)" input_type=InputType::Text />
        <p>"year | country | value"</p>
        {move || {
            let year = year.get();
            view! { <Table<A> year /> }
        }}
    }
}
