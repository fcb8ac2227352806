#![allow(async_fn_in_trait, clippy::struct_field_names)]

pub mod api;
pub mod storage;

mod pages;
use pages::{Countries, Home, Mortality};

mod components;

use std::{future::Future, sync::Arc};

use api::{Api, MortalityPage};
use common::MortalityRecord;

use leptos::{component, prelude::*, view, IntoView};
use leptos_router::{components::Routes, path};

use leptos_router::components::{Route, Router};
use serde::{de::DeserializeOwned, Serialize};
use slice_dst::SliceWithHeader;
use thaw::{
    Button, ConfigProvider, Theme, ToastIntent, ToastOptions, ToastPosition, ToasterProvider,
};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Warn,
    Error,
}

impl From<ToastKind> for ToastIntent {
    fn from(value: ToastKind) -> Self {
        match value {
            ToastKind::Info => ToastIntent::Info,
            ToastKind::Warn => ToastIntent::Warning,
            ToastKind::Error => ToastIntent::Error,
        }
    }
}

#[derive(Debug, Hash, PartialEq, Eq)]
pub struct ToastInfo {
    pub title: String,
    pub message: String,
    pub intent: ToastKind,
}

impl ToastInfo {
    pub fn new(title: impl Into<String>, message: impl Into<String>, intent: ToastKind) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            intent,
        }
    }

    pub fn options(&self) -> ToastOptions {
        ToastOptions::default()
            .with_position(ToastPosition::Top)
            .with_intent(self.intent.into())
    }

    pub fn into_toast(self) -> impl IntoView {
        use thaw::{Toast, ToastBody, ToastTitle};
        view! {
            <Toast>
                <ToastTitle>{self.title}</ToastTitle>
                <ToastBody>{self.message}</ToastBody>
            </Toast>
        }
    }
}

/// How the ui reacts to an error surfaced by the api.
pub trait ErrorAction {
    fn should_log(&self) -> bool;

    fn toast_info(&self) -> Option<ToastInfo>;

    fn is_bug(&self) -> bool;
}

fn not_found<A: Api>() -> impl IntoView {
    view! {
        <div>
            <p>"Not found :("</p>
            {expect_context::<AppRouter<A>>().anchor_root()}
        </div>
    }
}

#[derive(Clone)]
pub struct AppRouter<A: Api>(A);

impl<A: Api> Default for AppRouter<A> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! endpoint_anchor {
    ($name:ident, $path:literal, $($children:tt)+) => {
        pub fn $name(&self) -> impl IntoView {
            view! {
                <a href=$path >$($children)+</a>
            }
        }
    };
}

impl<A: Api> AppRouter<A> {
    /// ### Panics
    /// If corresponding API context was not provided
    #[inline]
    pub fn new() -> Self {
        Self(use_context::<A>().expect("Api should be provided"))
    }

    pub fn routes(&self) -> impl IntoView {
        let fallback = not_found::<A>;
        view! {
            <Routes fallback>
                <Route path=path!("/") view=move || view! { <Home<A> /> } />
                <Route path=path!("/us-mortalite") view=move || view! { <Mortality<A> /> } />
                <Route path=path!("/data") view=move || view! { <Countries<A> /> } />
            </Routes>
        }
    }

    /// Locale label of the backend this app talks to
    pub fn locale_label(&self) -> String {
        self.0.locale().label()
    }

    endpoint_anchor!(anchor_root, "/", "Home");
    endpoint_anchor!(anchor_mortality, "/us-mortalite", "Mortality");
    endpoint_anchor!(anchor_countries, "/data", "Countries");
}

#[component]
pub fn App<A: Api>(api: A) -> impl IntoView {
    provide_context(api);
    provide_context(AppRouter::<A>::new());
    let theme = RwSignal::new(Theme::dark());
    let toggle_theme = move || {
        theme.update(|theme| {
            *theme = match theme.name.as_str() {
                "light" => Theme::dark(),
                _ => Theme::light(),
            };
        });
    };
    let title = format!(
        "Mortality data, {}",
        expect_context::<AppRouter<A>>().locale_label()
    );
    view! {
        <ConfigProvider theme>
            <ToasterProvider>
                <Router>
                    <nav>
                        <p>{title}</p>
                        {expect_context::<AppRouter<A>>().anchor_root()}
                        {expect_context::<AppRouter<A>>().anchor_mortality()}
                        {expect_context::<AppRouter<A>>().anchor_countries()}
                        <Button on_click=move |_| toggle_theme()>"(toggle theme)"</Button>
                    </nav>
                    <main>{expect_context::<AppRouter<A>>().routes()}</main>
                </Router>
            </ToasterProvider>
        </ConfigProvider>
    }
}

#[macro_export]
macro_rules! react_errors {
    ($( $error_signal:expr $(,$error_type:ty)?);+ $(;)?) => { #[allow(unused_imports)] {
        use std::collections::HashSet;
        use $crate::{ErrorAction, ToastInfo, ToastKind};
        use leptos::{logging::warn, prelude::{Effect, Get}};
        use thaw::{ToasterInjection};
        let toaster = ToasterInjection::expect_context();
        Effect::new(move || {
            let mut toasts = HashSet::<ToastInfo>::new();
            $(
                if let Some(error) = $error_signal.get() {
                    $(let error: $error_type = error; )?
                    if error.should_log() {
                        warn!("{error}");
                    }

                    if let Some(toast_info) = error.toast_info() {
                        toasts.insert(toast_info);
                    }

                    if error.is_bug() {
                        toasts.insert(ToastInfo::new("Please note", "Application encountered an error, it's likely to misbehave", ToastKind::Warn));
                    }
                }
            )+

            for toast in toasts {
                let options = toast.options();
                toaster.dispatch_toast(
                    move || toast.into_toast(),
                    options,
                );
            }
        });
    }};
}

/// Runs `op` against the provided api whenever `source` changes, and splits
/// the outcome into value and error signals.
///
/// ### Panics
/// If api context was never provided
pub fn api_resource<A, Fut, Source, Ok, Err>(
    source: impl Fn() -> Source + Sync + Send + 'static,
    op: impl (for<'a> Fn(&'a A, Source) -> Fut) + Sync + Send + Clone + 'static,
) -> (Signal<Option<Ok>>, Signal<Option<Err>>)
where
    A: Api,
    Fut: Future<Output = Result<Ok, Err>> + Send + 'static,
    Err: Serialize + DeserializeOwned + Clone + Sync + Send + PartialEq + 'static,
    Ok: Serialize + DeserializeOwned + Clone + Sync + Send + 'static,
    Source: Clone + Sync + Send + PartialEq + 'static,
{
    let api = use_context::<A>().expect("Api must be provided");
    let resource = Resource::new(source, move |source| {
        let api = api.clone();
        let op = op.clone();
        async move { op(&api, source).await }
    });
    (
        Signal::derive(move || resource.get().and_then(Result::ok)),
        Signal::derive(move || resource.get().and_then(Result::err)),
    )
}

/// Page of items shared between views without copying them.
#[derive(Debug, Clone)]
pub struct ArcPage<Item>(Arc<SliceWithHeader<(u32, u32), Item>>);

impl<Item> ArcPage<Item> {
    pub fn new(page: u32, total_pages: u32, items: Vec<Item>) -> Self {
        Self(SliceWithHeader::new((page, total_pages), items))
    }

    pub fn items(&self) -> &[Item] {
        &self.0.slice
    }

    pub fn page(&self) -> u32 {
        self.0.header.0
    }

    pub fn total_pages(&self) -> u32 {
        self.0.header.1
    }

    pub fn is_empty(&self) -> bool {
        self.0.slice.is_empty()
    }
}

pub struct ArcPageIter<Item> {
    page: ArcPage<Item>,
    pos: usize,
}

impl<Item: Clone> Iterator for ArcPageIter<Item> {
    type Item = Item;

    fn next(&mut self) -> Option<Self::Item> {
        let res = self.page.items().get(self.pos).cloned();
        self.pos += 1;
        res
    }
}

impl<Item: Clone> IntoIterator for ArcPage<Item> {
    type Item = Item;

    type IntoIter = ArcPageIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        ArcPageIter { page: self, pos: 0 }
    }
}

pub type MortalityArcPage = ArcPage<MortalityRecord>;

impl From<MortalityPage> for MortalityArcPage {
    fn from(value: MortalityPage) -> Self {
        Self::new(value.page, value.total_pages, value.data.into_vec())
    }
}

#[cfg(test)]
mod test {
    use common::MortalityRecord;
    use serde_json::json;

    use crate::{api::MortalityPage, MortalityArcPage};

    fn record(id: i64) -> MortalityRecord {
        MortalityRecord(json!({"id": id, "id_pays": 1, "annee": 2000, "valeur": 1.0}))
    }

    #[test]
    fn arc_page_keeps_order() {
        let page = MortalityArcPage::from(MortalityPage {
            data: vec![record(3), record(1), record(2)].into_boxed_slice(),
            page: 2,
            total_pages: 5,
        });

        assert_eq!(page.page(), 2);
        assert_eq!(page.total_pages(), 5);
        assert!(!page.is_empty());
        assert_eq!(
            page.clone().into_iter().map(|r| r.id()).collect::<Vec<_>>(),
            vec![Some(3), Some(1), Some(2)]
        );
        assert_eq!(page.items().len(), 3);
    }
}
