use leptos::prelude::*;
use leptos_router::{
    NavigateOptions,
    components::Router,
    hooks::{use_location, use_navigate, use_query_map},
};

use permissions::{Bitmask, Catalog};

mod invite_links;
mod theme;

use invite_links::InviteLinks;
use theme::{ThemeSwitcher, use_themed};

/// Query parameter that carries the permission value.
const VALUE_PARAM: &str = "v";

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}

#[component]
fn App() -> impl IntoView {
    theme::provide_theme();
    let header_class = use_themed(
        "navbar bg-neutral text-neutral-content",
        "navbar bg-base-200 text-base-content",
    );

    view! {
        <Router>
            <header class=move || header_class.get()>
                <h1 class="flex-1 text-xl font-bold px-2">Permissions Calculator</h1>
                <ThemeSwitcher />
            </header>
            <Calculator />
        </Router>
    }
}

#[component]
fn Calculator() -> impl IntoView {
    let query = use_query_map();
    let initial = query.with_untracked(|query| query.get(VALUE_PARAM));
    let catalog = RwSignal::new(Catalog::new());
    catalog.update_untracked(|catalog| match catalog.decode(initial.as_deref()) {
        Some(value) => {
            leptos::logging::log!("Decoded {}={}", VALUE_PARAM, value);
            let stray = catalog.unknown_bits(value);
            if stray != 0 {
                leptos::logging::debug_warn!("Ignoring unknown permission bits {:#x}", stray);
            }
        }
        None => leptos::logging::log!("No preselection from {:?}", initial),
    });

    let bitmask = Memo::new(move |_| catalog.with(Catalog::bitmask));
    let explanation = move || catalog.with(Catalog::explain);
    sync_value_param(bitmask);

    let categories = catalog.with_untracked(|catalog| catalog.categories.len());

    view! {
        <main class="container p-4 flex flex-col gap-4">
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                {(0..categories)
                    .map(|index| view! { <CategoryCard catalog index /> })
                    .collect_view()}
            </div>

            <section id="result" class="card card-border p-4">
                <div class="stat">
                    <div class="stat-title">Permissions</div>
                    <div class="stat-value font-mono" aria-label="permissions value">
                        {bitmask}
                    </div>
                    <div class="stat-desc font-mono break-all" aria-label="explanation">
                        {explanation}
                    </div>
                </div>
                <button
                    type="button"
                    class="btn btn-warning btn-outline btn-sm self-end"
                    on:click=move |_| catalog.update(Catalog::reset)
                >
                    clear
                </button>
            </section>

            <InviteLinks permissions=bitmask />
        </main>
    }
}

/// Mirror the current value into the `v` query parameter so the page can be
/// bookmarked or shared.
fn sync_value_param(bitmask: Memo<Bitmask>) {
    let navigate = use_navigate();
    let location = use_location();

    Effect::watch(
        move || bitmask.get(),
        move |value, _, _| {
            let path = location.pathname.get_untracked();
            navigate(
                &format!("{}?{}={}", path, VALUE_PARAM, value),
                NavigateOptions {
                    replace: true,
                    scroll: false,
                    ..Default::default()
                },
            );
        },
        true,
    );
}

#[component]
fn CategoryCard(catalog: RwSignal<Catalog>, index: usize) -> impl IntoView {
    let (name, flags) = catalog.with_untracked(|catalog| {
        catalog
            .categories
            .get(index)
            .map(|category| {
                let flags = category
                    .flags
                    .iter()
                    .map(|flag| (flag.id, flag.name, flag.bit))
                    .collect::<Vec<_>>();
                (category.name, flags)
            })
            .unwrap_or_default()
    });

    let active = move || {
        catalog.with(|catalog| {
            catalog
                .categories
                .get(index)
                .is_some_and(|category| category.selected)
        })
    };
    let toggle = move |e: web_sys::Event| {
        let checked = event_target_checked(&e);
        catalog.update(|catalog| {
            if let Some(category) = catalog.categories.get_mut(index) {
                category.toggle(checked);
            }
        });
    };

    view! {
        <section class="card card-border p-4" aria-label=name>
            <label class="label font-bold text-lg">
                <input type="checkbox" class="toggle toggle-primary" prop:checked=active on:change=toggle />
                {name}
            </label>
            <ul class="flex flex-col gap-1 mt-2">
                {flags
                    .into_iter()
                    .map(|(id, label, bit)| view! { <FlagCheckbox catalog id label bit /> })
                    .collect_view()}
            </ul>
        </section>
    }
}

#[component]
fn FlagCheckbox(
    catalog: RwSignal<Catalog>,
    id: &'static str,
    label: &'static str,
    bit: Bitmask,
) -> impl IntoView {
    let checked = move || catalog.with(|catalog| catalog.flag(id).is_some_and(|flag| flag.selected));
    let change = move |e: web_sys::Event| {
        let checked = event_target_checked(&e);
        catalog.update(|catalog| {
            if let Err(e) = catalog.set(id, checked) {
                leptos::logging::error!("{}", e);
            }
        });
    };

    view! {
        <li>
            <label class="label" title=format!("{:#x}", bit)>
                <input type="checkbox" class="checkbox checkbox-sm" prop:checked=checked on:change=change />
                {label}
            </label>
        </li>
    }
}
