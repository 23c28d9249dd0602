//! Display Metadata
//!
//! Label and colour for every priority and status code. Lookups are total:
//! unknown codes get a neutral entry instead of rendering nothing.

use serde::{Deserialize, Serialize};

use crate::task::TaskStatus;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
    Unknown(i64),
}

impl Priority {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Priority::High,
            2 => Priority::Medium,
            3 => Priority::Low,
            other => Priority::Unknown(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
            Priority::Unknown(code) => *code,
        }
    }
}

/// Label and text class for a priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityMeta {
    pub label: &'static str,
    pub class: &'static str,
}

pub fn priority_meta(priority: Priority) -> PriorityMeta {
    match priority {
        Priority::High => PriorityMeta { label: "高", class: "text-red-500 font-bold" },
        Priority::Medium => PriorityMeta { label: "中", class: "text-gray-700" },
        Priority::Low => PriorityMeta { label: "低", class: "text-gray-400" },
        Priority::Unknown(code) => {
            log::debug!("[LABELS] Unknown priority code {}", code);
            PriorityMeta { label: "-", class: "text-gray-300" }
        }
    }
}

/// Label, text and background classes for a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMeta {
    pub label: &'static str,
    pub color: &'static str,
    pub bg: &'static str,
}

impl StatusMeta {
    /// Progress bar fill in the badge colour
    pub fn bar_class(&self) -> String {
        self.color.replacen("text-", "bg-", 1)
    }
}

pub fn status_meta(status: TaskStatus) -> StatusMeta {
    match status {
        TaskStatus::NotStarted => StatusMeta { label: "待开始", color: "text-gray-600", bg: "bg-gray-100" },
        TaskStatus::InProgress => StatusMeta { label: "进行中", color: "text-blue-600", bg: "bg-blue-100" },
        TaskStatus::Paused => StatusMeta { label: "已暂停", color: "text-yellow-600", bg: "bg-yellow-100" },
        TaskStatus::Completed => StatusMeta { label: "已完成", color: "text-green-600", bg: "bg-green-100" },
        TaskStatus::Accepted => StatusMeta { label: "已验收", color: "text-emerald-600", bg: "bg-emerald-100" },
        TaskStatus::Redo => StatusMeta { label: "重做", color: "text-orange-600", bg: "bg-orange-100" },
        TaskStatus::Discarded | TaskStatus::Abandoned => {
            StatusMeta { label: "已删除", color: "text-gray-400", bg: "bg-gray-50" }
        }
        TaskStatus::Unknown(code) => {
            log::debug!("[LABELS] Unknown status code {}", code);
            StatusMeta { label: "未知", color: "text-gray-400", bg: "bg-gray-50" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_priorities() {
        assert_eq!(priority_meta(Priority::from_code(1)).label, "高");
        assert_eq!(priority_meta(Priority::from_code(2)).label, "中");
        assert_eq!(priority_meta(Priority::from_code(3)).label, "低");
    }

    #[test]
    fn test_unknown_codes_have_entries() {
        assert_eq!(priority_meta(Priority::from_code(7)).label, "-");
        assert_eq!(status_meta(TaskStatus::from_code(42)).label, "未知");
    }

    #[test]
    fn test_every_status_code_has_a_label() {
        for code in 1..=6 {
            let meta = status_meta(TaskStatus::from_code(code));
            assert!(!meta.label.is_empty());
            assert!(meta.color.starts_with("text-"));
        }
        assert_eq!(status_meta(TaskStatus::Accepted).label, "已验收");
    }

    #[test]
    fn test_bar_class() {
        assert_eq!(status_meta(TaskStatus::InProgress).bar_class(), "bg-blue-600");
    }
}
