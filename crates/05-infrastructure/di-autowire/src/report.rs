//! 处理报告

use autowire_common::{FileOutcome, ServiceIdentifier, SkipReason};
use std::collections::BTreeMap;
use std::fmt;

/// 一次 `process()` 的汇总结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessReport {
    /// 遍历到的文件数量
    pub files_seen: usize,
    /// 注册的服务标识符，按标识符排序
    pub registered: Vec<ServiceIdentifier>,
    /// 注册的别名数量
    pub aliases_registered: usize,
    /// 被跳过的构造参数总数
    pub skipped_arguments: usize,
    /// 按原因分组的跳过文件数量
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl ProcessReport {
    /// 记录单个文件的处理结果
    pub fn record(&mut self, outcome: FileOutcome) {
        self.files_seen += 1;
        match outcome {
            FileOutcome::Registered {
                id,
                aliases,
                skipped_arguments,
            } => {
                self.registered.push(id);
                self.aliases_registered += aliases;
                self.skipped_arguments += skipped_arguments;
            }
            FileOutcome::Skipped(reason) => {
                *self.skipped.entry(reason).or_insert(0) += 1;
            }
        }
    }

    /// 完成汇总，对注册列表排序
    pub(crate) fn finish(mut self) -> Self {
        self.registered.sort();
        self
    }

    /// 注册的服务数量
    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }

    /// 因指定原因被跳过的文件数量
    pub fn skipped_count(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    /// 被跳过的文件总数
    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}

impl fmt::Display for ProcessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "文件 {}，注册服务 {}，注册别名 {}，跳过参数 {}",
            self.files_seen,
            self.registered_count(),
            self.aliases_registered,
            self.skipped_arguments
        )?;
        for (reason, count) in &self.skipped {
            write!(f, "，{reason} {count}")?;
        }
        Ok(())
    }
}

impl FromIterator<FileOutcome> for ProcessReport {
    fn from_iter<T: IntoIterator<Item = FileOutcome>>(iter: T) -> Self {
        let mut report = Self::default();
        for outcome in iter {
            report.record(outcome);
        }
        report.finish()
    }
}
