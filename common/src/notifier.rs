//! 通知（トースト）の状態
//!
//! 同時に表示するのは1件のみ。新しい通知は現在の通知を置き換える。
//! 自動消去のタイマーは通知IDを持って `expire` を呼ぶ。IDが現在の通知と
//! 異なれば何もしないので、置き換え済みの古いタイマーは無効になる。

use std::time::Duration;

/// 自動消去までの時間
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default)]
pub struct Notifier {
    current: Option<Notification>,
    next_id: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// 通知を表示し、タイマー用のIDを返す
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.current = Some(Notification {
            id,
            message: message.into(),
            severity,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Error)
    }

    /// 即時に消去
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// タイマー満了。`id` が現在の通知なら消去して true を返す。
    pub fn expire(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}
