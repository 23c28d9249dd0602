//! Daily Task Row Component
//!
//! One daily task with the actions its status allows. Completing asks for a
//! self score first; discarding asks for confirmation.

use leptos::prelude::*;
use leptos::task::spawn_local;

use flywheel_core::labels::{priority_meta, status_meta};
use flywheel_core::task::{transitions, PayloadShape, TaskAction, TaskItem, TaskStatus, TransitionError};

use crate::actions;
use crate::components::ConfirmButton;
use crate::context::use_app_context;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

#[component]
pub fn DailyTaskRow(task: TaskItem, index: usize) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();
    let (score, set_score) = signal(String::new());
    let (scoring, set_scoring) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let task_id = task.id;
    let from = task.status;

    let run = move |action: TaskAction| {
        let input = score.get_untracked();
        set_error.set(None);
        spawn_local(async move {
            match actions::transition(ctx, store, task_id, from, action, input).await {
                Ok(()) => {
                    set_scoring.set(false);
                    set_score.set(String::new());
                }
                Err(e) => set_error.set(Some(error_text(&e))),
            }
        });
    };

    let priority = priority_meta(task.priority);
    let status = status_meta(task.status);
    let file_count = task.files.len();

    view! {
        <div class="daily-row">
            <div class="daily-title">
                <div class="daily-title-line">
                    <span class="task-index">{index + 1}</span>
                    <span class="task-title" title=task.title.clone()>{task.title.clone()}</span>
                    {task.description.clone().map(|d| view! { <span class="task-hint" title=d>"ⓘ"</span> })}
                </div>
                <div class="daily-time">
                    <span>"🕒 "{format!("{}~{}", task.from, task.to)}</span>
                    {(file_count > 0).then(|| view! { <span class="daily-files">{format!("{} 文件", file_count)}</span> })}
                </div>
                {task.remark.clone().map(|r| view! { <div class="daily-remark">{format!("驳回: {}", r)}</div> })}
            </div>
            <div class="daily-token">{task.token_estimate.clone().unwrap_or_else(|| "-".to_string())}</div>
            <div class="daily-priority"><span class=priority.class>{priority.label}</span></div>
            <div class="daily-status">
                <span class=format!("badge {} {}", status.bg, status.color)>{status.label}</span>
            </div>
            <div class="daily-actions">
                <Show when=move || store.can_edit().get()>
                    {action_buttons(from, run, set_scoring)}
                </Show>
                <Show when=move || scoring.get()>
                    <div class="score-popover">
                        <div class="score-title">{TaskAction::Complete.label()}</div>
                        <input
                            type="number"
                            min="0"
                            max="100"
                            placeholder="0-100分"
                            prop:value=move || score.get()
                            on:input=move |ev| set_score.set(event_target_value(&ev))
                        />
                        <button on:click=move |_| run(TaskAction::Complete)>"提交"</button>
                        <button class="cancel-btn" on:click=move |_| set_scoring.set(false)>"取消"</button>
                    </div>
                </Show>
                {move || error.get().map(|e| view! { <div class="row-error">{e}</div> })}
            </div>
        </div>
    }
}

fn action_buttons(
    from: TaskStatus,
    run: impl Fn(TaskAction) + Copy + Send + Sync + 'static,
    set_scoring: WriteSignal<bool>,
) -> impl IntoView {
    transitions(from)
        .iter()
        .map(|edge| {
            let action = edge.action;
            match (action, edge.payload) {
                (_, PayloadShape::SelfScore) => view! {
                    <button class="action-btn complete" title=action.label() on:click=move |_| set_scoring.set(true)>
                        "✓"
                    </button>
                }
                .into_any(),
                (TaskAction::Discard, _) => view! {
                    <ConfirmButton
                        label=action.label()
                        prompt="确认废弃?"
                        button_class="action-btn discard"
                        on_confirm=Callback::new(move |_| run(action))
                    />
                }
                .into_any(),
                _ => view! {
                    <button class="action-btn" on:click=move |_| run(action)>
                        {action.label()}
                    </button>
                }
                .into_any(),
            }
        })
        .collect_view()
}

fn error_text(error: &TransitionError) -> String {
    match error {
        TransitionError::MissingScore => "请输入自评分".to_string(),
        TransitionError::ScoreOutOfRange(_) | TransitionError::InvalidScore(_) => "自评分需为 0-100 的整数".to_string(),
        TransitionError::NotAllowed { .. } => "当前状态不可执行该操作".to_string(),
    }
}
