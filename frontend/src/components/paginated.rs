use std::{future::Future, hash::Hash, marker::PhantomData};

use crate::{
    api::{Api, ApiError},
    api_resource, react_errors, ArcPage,
};
use leptos::{component, prelude::*, view, IntoView};
use serde::{de::DeserializeOwned, Serialize};
use thaw::{Pagination, Scrollbar, Spinner};

/// Page switcher over whatever `fetcher` returns for a 1-based page number.
#[component]
pub fn Paginated<A, ApiPage, Fetcher, Fetch, Item, ItemView, ItemKey>(
    #[prop(optional)] _ph: PhantomData<(Item, ItemView, ItemKey)>,
    #[allow(unused)] api: PhantomData<A>,
    fetcher: Fetcher,
    item: impl Fn(Item) -> ItemView + Clone + Send + Sync + 'static,
    key: impl Fn(&Item) -> ItemKey + Clone + Send + Sync + 'static,
    #[prop(into, optional)] empty: String,
) -> impl IntoView
where
    A: Api,
    Fetcher: Fn(&A, usize) -> Fetch + Clone + Send + Sync + 'static,
    Fetch: Future<Output = Result<ApiPage, ApiError>> + Send + Sync + 'static,
    ApiPage: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
    ArcPage<Item>: From<ApiPage>,
    Item: Clone + Send + Sync + 'static,
    ItemView: IntoView + 'static,
    ItemKey: Eq + Hash + 'static,
{
    // store functions
    let item = StoredValue::new(item);
    let key = StoredValue::new(key);
    let empty = StoredValue::new(empty);

    let page_no = RwSignal::new(1usize);
    let (page, page_err) =
        api_resource::<A, _, usize, ApiPage, ApiError>(move || page_no.get(), fetcher);
    let page = Signal::derive(move || page.get().map(ArcPage::<Item>::from));

    // handle errors
    react_errors!(page_err, ApiError);

    view! {
        <Suspense fallback=|| {
            view! { <Spinner /> }
        }>
            {move || {
                page.get()
                    .map(|page| {
                        if page.is_empty() {
                            return view! { <p>{empty.get_value()}</p> }.into_any();
                        }
                        view! {
                            <Pagination
                                page_count=page.total_pages() as usize
                                page=page_no
                                sibling_count=2
                            />
                            <Scrollbar>
                                <ul>
                                    <For
                                        each=move || page.clone()
                                        key=key.get_value()
                                        children=item.get_value()
                                    />
                                </ul>
                            </Scrollbar>
                        }
                            .into_any()
                    })
            }}
        </Suspense>
    }
}
