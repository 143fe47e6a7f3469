//! 整理作業回報給介面的事件
//!
//! 核心透過 crossbeam channel 送出事件，介面只負責接收與顯示。

/// 單一複製失敗的紀錄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedCopy {
    pub source_name: String,
    pub destination_name: String,
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// 沒有找到任何符合的檔案
    NothingToDo,
    FullSuccess,
    /// 部分檔案複製失敗或被中斷略過
    PartialSuccess,
}

/// 整批作業結束時的統計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub copied: usize,
    /// 收到中斷訊號後未執行的指令數
    pub skipped: usize,
    pub failures: Vec<FailedCopy>,
}

impl BatchSummary {
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    #[must_use]
    pub fn outcome(&self) -> BatchOutcome {
        if self.total == 0 {
            BatchOutcome::NothingToDo
        } else if self.copied == self.total {
            BatchOutcome::FullSuccess
        } else {
            BatchOutcome::PartialSuccess
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizeEvent {
    /// 掃描完成，找到的檔案數
    FilesDiscovered { count: usize },
    /// 計畫完成，之後會送出同樣數量的複製結果
    OperationsPlanned { total: usize },
    Copied {
        source_name: String,
        destination_name: String,
    },
    CopyFailed(FailedCopy),
    Finished(BatchSummary),
    Cancelled(BatchSummary),
    /// 作業開始前就無法繼續（例如來源資料夾不存在）
    Error(String),
}

impl OrganizeEvent {
    /// 是否為整批作業的最後一個事件
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished(_) | Self::Cancelled(_) | Self::Error(_))
    }
}
