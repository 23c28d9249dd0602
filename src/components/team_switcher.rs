//! Team Switcher Component
//!
//! Dropdown of the teams in the menu tree. Picking one swaps the "General"
//! menu and persists the choice.

use leptos::prelude::*;

use flywheel_core::menu::Team;

use crate::actions;
use crate::context::use_app_context;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

#[component]
pub fn TeamSwitcher() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();
    let (open, set_open) = signal(false);

    // Active team, else the first one
    let shown = move || -> Option<Team> {
        let nav = store.nav().read();
        nav.teams
            .iter()
            .find(|t| t.id == nav.active_team_id)
            .or_else(|| nav.teams.first())
            .cloned()
    };

    view! {
        <div class="team-switcher">
            {move || match shown() {
                Some(team) => view! {
                    <button class="team-switcher-trigger" on:click=move |_| set_open.update(|o| *o = !*o)>
                        <span class=team.logo.css_class()>{team.logo.glyph()}</span>
                        <span class="team-text">
                            <span class="team-name">{team.name.clone()}</span>
                            <span class="team-agent">{team.agent.clone()}</span>
                        </span>
                        <span class="chevron">"⌄"</span>
                    </button>
                }.into_any(),
                None => view! { <div class="team-switcher-empty">{ctx.services().config.site_name}</div> }.into_any(),
            }}
            <Show when=move || open.get()>
                <ul class="team-menu">
                    <li class="team-menu-label">"部门"</li>
                    <For
                        each=move || store.nav().read().teams.clone()
                        key=|team| team.id
                        children=move |team| {
                            let id = team.id;
                            let item_class = move || {
                                if store.nav().read().active_team_id == id { "team-menu-item active" } else { "team-menu-item" }
                            };
                            view! {
                                <li
                                    class=item_class
                                    on:click=move |_| {
                                        actions::select_team(ctx, store, id);
                                        set_open.set(false);
                                    }
                                >
                                    <span class=team.logo.css_class()>{team.logo.glyph()}</span>
                                    {team.name.clone()}
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
