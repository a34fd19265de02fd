use crate::common::Period;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// # Summary
/// 请求级查询配置：每次渲染显式传入核心函数，核心不读取任何环境状态。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    // 开始日期（含）
    pub start_date: NaiveDate,
    // 结束日期（含）
    pub end_date: NaiveDate,
    // 行情周期
    pub period: Period,
    // 指数名称（查 INDEX_CATALOG）
    pub index: String,
}

impl QueryConfig {
    /// 单日查询的便捷构造
    pub fn single_day(day: NaiveDate, period: Period, index: impl Into<String>) -> Self {
        Self {
            start_date: day,
            end_date: day,
            period,
            index: index.into(),
        }
    }
}

/// # Summary
/// 日期区间预设（今日/昨日/近一周）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePreset {
    // 今日
    Today,
    // 昨日
    Yesterday,
    // 近一周（最近 7 个自然日）
    PastWeek,
}

impl DatePreset {
    /// # Summary
    /// 按给定"今天"展开为 (开始, 结束) 日期对。
    ///
    /// # Logic
    /// 1. 今日 → (今天, 今天)。
    /// 2. 昨日 → (昨天, 昨天)。
    /// 3. 近一周 → (今天 - 6 天, 今天)。
    ///
    /// # Arguments
    /// * `today`: 当前日期（由 TimeProvider 提供）。
    ///
    /// # Returns
    /// 展开后的日期区间。
    pub fn apply(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            DatePreset::Today => (today, today),
            DatePreset::Yesterday => {
                let day = today.checked_sub_days(Days::new(1)).unwrap_or(today);
                (day, day)
            }
            DatePreset::PastWeek => {
                let start = today.checked_sub_days(Days::new(6)).unwrap_or(today);
                (start, today)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_presets() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(DatePreset::Today.apply(today), (today, today));
        let yesterday = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        assert_eq!(DatePreset::Yesterday.apply(today), (yesterday, yesterday));
        let week_start = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        assert_eq!(DatePreset::PastWeek.apply(today), (week_start, today));
    }

    #[test]
    fn test_single_day_config() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let config = QueryConfig::single_day(day, Period::Minute5, "上证指数");
        assert_eq!(config.start_date, config.end_date);
        assert_eq!(config.period, Period::Minute5);
        assert_eq!(config.index, "上证指数");
    }
}
