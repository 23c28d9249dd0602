//! Simple Task Table Component
//!
//! Monthly and weekly goals: index, title, priority, status and progress.

use leptos::prelude::*;

use flywheel_core::labels::{priority_meta, status_meta};
use flywheel_core::task::TaskItem;

#[component]
pub fn SimpleTaskTable(#[prop(into)] tasks: Signal<Vec<TaskItem>>) -> impl IntoView {
    let rows = move || tasks.get().into_iter().enumerate().collect::<Vec<_>>();

    view! {
        <div class="simple-task-table">
            <For
                each=rows
                key=|(idx, task)| (*idx, task.id, task.status)
                children=|(idx, task)| {
                    let priority = priority_meta(task.priority);
                    let status = status_meta(task.status);
                    let percent = task.percent.unwrap_or(0.0);
                    view! {
                        <div class="task-row">
                            <div class="task-index">{format!("{:02}", idx + 1)}</div>
                            <div class="task-title">
                                <span>{task.title.clone()}</span>
                                {task.description.clone().map(|d| view! { <span class="task-hint" title=d>"ⓘ"</span> })}
                            </div>
                            <div class=format!("task-priority {}", priority.class)>{priority.label}</div>
                            <div class="task-status">
                                <span class=format!("badge {} {}", status.bg, status.color)>{status.label}</span>
                            </div>
                            <div class="task-percent">
                                <div class="progress">
                                    <div
                                        class=format!("progress-fill {}", status.bar_class())
                                        style=format!("width: {}%", percent.clamp(0.0, 100.0))
                                    ></div>
                                </div>
                            </div>
                        </div>
                    }
                }
            />
            <Show when=move || tasks.with(|t| t.is_empty())>
                <div class="empty-note">"暂无数据"</div>
            </Show>
        </div>
    }
}
