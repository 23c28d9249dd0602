//! Nav Group Component
//!
//! Titled list of menu entries. Entries with children render as collapsible
//! sections, leaves as links.

use leptos::prelude::*;

use flywheel_core::menu::MenuItem;

#[component]
pub fn NavGroup(title: &'static str, items: Vec<MenuItem>) -> impl IntoView {
    view! {
        <div class="nav-group">
            <div class="nav-group-title">{title}</div>
            <ul class="nav-list">
                {items.into_iter().map(|item| view! { <NavEntry item=item /> }).collect_view()}
            </ul>
        </div>
    }
}

#[component]
fn NavEntry(item: MenuItem) -> AnyView {
    let MenuItem { title, url, icon, items } = item;
    match items {
        Some(children) => {
            let (expanded, set_expanded) = signal(false);
            view! {
                <li class="nav-entry collapsible">
                    <button class="nav-link" on:click=move |_| set_expanded.update(|e| *e = !*e)>
                        <span class=icon.css_class()>{icon.glyph()}</span>
                        <span class="nav-title">{title}</span>
                        <span class="chevron">{move || if expanded.get() { "▾" } else { "▸" }}</span>
                    </button>
                    <ul class="nav-sub" class:hidden=move || !expanded.get()>
                        {children.into_iter().map(|child| view! { <NavEntry item=child /> }.into_any()).collect_view()}
                    </ul>
                </li>
            }
            .into_any()
        }
        None => view! {
            <li class="nav-entry">
                <a class="nav-link" href=url>
                    <span class=icon.css_class()>{icon.glyph()}</span>
                    <span class="nav-title">{title}</span>
                </a>
            </li>
        }
        .into_any(),
    }
}
