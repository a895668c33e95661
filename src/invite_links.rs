use invite::{InviteInfo, Provider};
use leptos::prelude::*;
use permissions::Bitmask;

#[component]
pub fn InviteLinks(#[prop(into)] permissions: Signal<Bitmask>) -> impl IntoView {
    let (client_id, set_client_id) = signal(String::new());
    let (scope, set_scope) = signal(String::new());
    let (has_scope, set_has_scope) = signal(false);
    let (has_code, set_has_code) = signal(false);

    let info = Signal::derive(move || InviteInfo {
        id: Some(client_id.get().trim().to_owned()),
        scope: Some(scope.get()),
        has_scope: has_scope.get(),
        has_code: has_code.get(),
    });

    view! {
        <section id="invite" class="card card-border p-4 flex flex-col gap-2">
            <h2 class="card-title">Invite link</h2>
            <input
                type="text"
                class="input w-full"
                placeholder="Client ID"
                aria-label="client id"
                bind:value=(client_id, set_client_id)
            />
            <label class="label">
                <input type="checkbox" class="checkbox" bind:checked=(has_scope, set_has_scope) />
                "Custom scopes"
            </label>
            <input
                type="text"
                class="input w-full"
                placeholder="bot,identify"
                aria-label="scopes"
                disabled=move || !has_scope.get()
                bind:value=(scope, set_scope)
            />
            <label class="label">
                <input type="checkbox" class="checkbox" bind:checked=(has_code, set_has_code) />
                "Require code grant"
            </label>
            <InviteLink label="Authorize" provider=Provider::Primary info permissions />
            <InviteLink label="Embed preview" provider=Provider::EmbedPreview info permissions />
        </section>
    }
}

#[component]
fn InviteLink(
    label: &'static str,
    provider: Provider,
    info: Signal<InviteInfo>,
    permissions: Signal<Bitmask>,
) -> impl IntoView {
    let link = move || {
        info.with(|info| invite::invite_url(Some(provider), Some(info), Some(permissions.get())))
    };

    view! {
        <div aria-label=label>
            <span class="font-bold">{label}": "</span>
            {move || match link() {
                Ok(url) if url.is_empty() => {
                    leptos::either::EitherOf3::A(view! { <span class="opacity-60">"Enter a client ID"</span> })
                }
                Ok(url) => {
                    leptos::either::EitherOf3::B(view! {
                        <a class="link link-primary break-all" href=url.clone() target="_blank">
                            {url.clone()}
                        </a>
                    })
                }
                Err(e) => {
                    leptos::logging::debug_warn!("{} link: {}", label, e);
                    leptos::either::EitherOf3::C(view! { <span class="text-error">{e.to_string()}</span> })
                }
            }}
        </div>
    }
}
