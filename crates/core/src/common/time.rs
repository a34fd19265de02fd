use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use std::sync::RwLock;

/// # Summary
/// 时间戳归一化与交易日历推算工具集。
///
/// 数据源返回的时间字段编码五花八门：`YYYYMMDD` 纯数字、ISO 日期、带 `T` 的
/// ISO 日期时间、`"日期 时间"`、裸 `HH:MM[:SS]`、3/4/6 位纯数字钟点。这里把
/// 它们统一成两种形态：
/// - 展示标签：日线 `"YYYY-MM-DD"`，分钟线 `"YYYY-MM-DD\nHH:MM"`（换行便于绘图）
/// - 对齐键：`"YYYY-MM-DD"` 或 `"YYYY-MM-DD HH:MM"`（可排序、可比较）
///
/// # Invariants
/// - 所有函数都是全函数：畸形输入回退为原文本，绝不 panic、绝不报错。

/// 截取前 5 个字节（"HH:MM"），短于 5 字节时原样返回
fn clip_hhmm(text: &str) -> &str {
    text.get(..5).unwrap_or(text)
}

/// 是否全为 ASCII 数字
fn all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// `YYYYMMDD` → `YYYY-MM-DD`（调用方保证 8 位纯数字）
fn dash_ymd(text: &str) -> String {
    format!("{}-{}-{}", &text[..4], &text[4..6], &text[6..])
}

/// # Summary
/// 把单个分钟级时间文本归一化为展示标签。
///
/// # Logic
/// 按优先级依次匹配：
/// 1. 同时含空格和冒号 → 在第一个空格处拆成 `"日期\n时间"`。
/// 2. 含 `T`、`-`、`:` → 在 `T` 处拆分，丢弃小数秒，时间截断到 `HH:MM`。
/// 3. 含 `-` 和 `:` → 空格替换为换行。
/// 4. 只含 `:` → 原样返回（裸钟点，日期由调用方补）。
/// 5. 3/4/6 位纯数字 → 补齐为 `H:MM` / `HH:MM` / `HH:MM:SS` 钟点。
/// 6. 其余 → 原文本。
///
/// # Arguments
/// * `text`: 原始时间文本。
///
/// # Returns
/// 空白输入返回 None，否则返回归一化标签。
pub fn minute_display_text(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if text.contains(' ') && text.contains(':') {
        if let Some((date_part, time_part)) = text.split_once(' ') {
            return Some(format!("{}\n{}", date_part, time_part));
        }
        return Some(text.to_string());
    }
    if text.contains('T') && text.contains('-') && text.contains(':') {
        if let Some((date_part, time_part)) = text.split_once('T') {
            let time_part = time_part.split('.').next().unwrap_or(time_part);
            return Some(format!("{}\n{}", date_part, clip_hhmm(time_part)));
        }
        return Some(text.to_string());
    }
    if text.contains('-') && text.contains(':') {
        return Some(text.replace(' ', "\n"));
    }
    if text.contains(':') {
        return Some(text.to_string());
    }
    if text.len() == 3 && all_digits(text) {
        return Some(format!("0{}:{}", &text[..1], &text[1..]));
    }
    if text.len() == 4 && all_digits(text) {
        return Some(format!("{}:{}", &text[..2], &text[2..]));
    }
    if text.len() == 6 && all_digits(text) {
        return Some(format!("{}:{}:{}", &text[..2], &text[2..4], &text[4..]));
    }
    Some(text.to_string())
}

/// # Summary
/// 把日线时间文本归一化为 `YYYY-MM-DD` 展示标签。
///
/// # Logic
/// 1. 8 位纯数字 → 加横线。
/// 2. 含空格 / 含 `T` → 取日期部分。
/// 3. 其余 → 原文本。
///
/// # Arguments
/// * `text`: 原始日期文本。
///
/// # Returns
/// 归一化后的日期标签。
pub fn day_label_text(text: &str) -> String {
    let text = text.trim();
    if text.len() == 8 && all_digits(text) {
        return dash_ymd(text);
    }
    if let Some((date_part, _)) = text.split_once(' ') {
        return date_part.to_string();
    }
    if let Some((date_part, _)) = text.split_once('T') {
        return date_part.to_string();
    }
    text.to_string()
}

/// # Summary
/// 把位置序号归一化为日线标签：小序号按锚点日期做天数偏移。
///
/// # Logic
/// 1. 序号文本恰为 8 位 → 按 `YYYYMMDD` 加横线。
/// 2. 序号小于 10000 且有锚点 → 锚点日期 + 序号个自然日。
/// 3. 其余 → 序号文本。
///
/// # Arguments
/// * `index`: 位置序号。
/// * `anchor`: 可选锚点日期。
///
/// # Returns
/// 归一化后的日期标签。
pub fn day_label_index(index: usize, anchor: Option<NaiveDate>) -> String {
    let text = index.to_string();
    if text.len() == 8 {
        return dash_ymd(&text);
    }
    if index < 10_000 {
        if let Some(anchor) = anchor {
            if let Some(day) = anchor.checked_add_days(Days::new(index as u64)) {
                return day.to_string();
            }
        }
    }
    text
}

/// # Summary
/// 把分钟级时间文本归一化为可排序的对齐键 `"YYYY-MM-DD HH:MM"`。
///
/// # Logic
/// 1. 含换行的展示标签 → 还原为空格连接，时间截断到 5 位。
/// 2. `"日期 时间"` / ISO `T` 形态 → 统一为空格连接，丢弃小数秒。
/// 3. 裸钟点且有锚点 → 用锚点日期拼接。
/// 4. 其余 → 原文本。
///
/// # Arguments
/// * `text`: 原始或已格式化的时间文本。
/// * `anchor`: 裸钟点使用的锚点日期。
///
/// # Returns
/// 对齐键文本。
pub fn minute_key_text(text: &str, anchor: Option<NaiveDate>) -> String {
    let text = text.trim();
    if text.contains('\n') {
        let mut parts = text.splitn(2, '\n');
        let date_part = parts.next().unwrap_or("");
        let time_part = parts.next().unwrap_or("");
        if date_part.contains('-') && time_part.contains(':') {
            return format!("{} {}", date_part, clip_hhmm(time_part));
        }
    }
    if text.contains(' ') && text.contains('-') && text.contains(':') {
        if let Some((date_part, time_part)) = text.split_once(' ') {
            return format!("{} {}", date_part, clip_hhmm(time_part));
        }
    }
    if text.contains('T') && text.contains('-') && text.contains(':') {
        if let Some((date_part, time_part)) = text.split_once('T') {
            let time_part = time_part.split('.').next().unwrap_or(time_part);
            return format!("{} {}", date_part, clip_hhmm(time_part));
        }
    }
    if text.contains(':') {
        if let Some(anchor) = anchor {
            return format!("{} {}", anchor, clip_hhmm(text));
        }
    }
    text.to_string()
}

/// # Summary
/// 把分钟对齐键转回绘图标签（空格 → 换行）。
///
/// # Arguments
/// * `key`: 对齐键文本。
///
/// # Returns
/// 展示标签文本。
pub fn minute_key_label(key: &str) -> String {
    if key.contains(' ') && key.contains('-') && key.contains(':') {
        if let Some((date_part, time_part)) = key.split_once(' ') {
            return format!("{}\n{}", date_part, time_part);
        }
    }
    key.to_string()
}

/// # Summary
/// 从任意轴标签中提取其携带的 `YYYY-MM-DD` 日期。
///
/// # Logic
/// 1. 依次剥离换行、`T`、空格之后的时间部分。
/// 2. 剩余文本是 10 位带横线日期或 8 位纯数字日期 → 归一化返回。
/// 3. 其余 → None（标签不携带日期）。
///
/// # Arguments
/// * `text`: 轴标签文本。
///
/// # Returns
/// 标签携带的日期，或 None。
pub fn label_date_text(text: &str) -> Option<String> {
    let mut text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Some((head, _)) = text.split_once('\n') {
        text = head.trim();
    }
    if let Some((head, _)) = text.split_once('T') {
        text = head.trim();
    }
    if text.contains(' ') && text.contains('-') {
        if let Some((head, _)) = text.split_once(' ') {
            text = head.trim();
        }
    }
    let bytes = text.as_bytes();
    if text.len() == 10 && bytes.get(4) == Some(&b'-') && bytes.get(7) == Some(&b'-') {
        return Some(text.to_string());
    }
    if text.len() == 8 && all_digits(text) {
        return Some(dash_ymd(text));
    }
    None
}

/// 周六或周日
fn is_weekend(day: NaiveDate) -> bool {
    day.weekday().number_from_monday() >= 6
}

/// 向后滚动到最近的交易日（周一至周五）
fn skip_weekend(mut day: NaiveDate) -> NaiveDate {
    while is_weekend(day) {
        match day.succ_opt() {
            Some(next) => day = next,
            None => return day,
        }
    }
    day
}

/// # Summary
/// 从起始日期向后推进 N 个交易日（仅跳过周末，不含节假日历）。
///
/// # Logic
/// 1. 负数推进量按 0 处理。
/// 2. 先把起始日滚动到最近的非周末。
/// 3. 每次前进一个自然日并跳过周末，重复 N 次。
///
/// # Arguments
/// * `start`: 起始日期。
/// * `days`: 推进的交易日数。
///
/// # Returns
/// 推进后的交易日。
pub fn add_trading_days(start: NaiveDate, days: i64) -> NaiveDate {
    let days = days.max(0);
    let mut current = skip_weekend(start);
    for _ in 0..days {
        match current.succ_opt() {
            Some(next) => current = skip_weekend(next),
            None => return current,
        }
    }
    current
}

/// # Summary
/// 枚举闭区间内的全部交易日（周一至周五），升序。
///
/// # Arguments
/// * `start`: 开始日期（含）。
/// * `end`: 结束日期（含）。
///
/// # Returns
/// 交易日列表；`start > end` 时为空。
pub fn trading_dates(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    if start > end {
        return out;
    }
    let mut current = start;
    while current <= end {
        if !is_weekend(current) {
            out.push(current);
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    out
}

/// # Summary
/// A 股单日交易分钟网格（以分钟-of-day 表示）。
///
/// # Logic
/// 1. 步长钳制到 ≥ 1。
/// 2. 上午段：1 分钟周期从 09:30 起，更长周期从 09:30+step 起，至 11:30（含）。
/// 3. 下午段：13:00+step 起，至 15:00（含）。
///
/// # Arguments
/// * `step_minutes`: 周期步长（分钟）。
///
/// # Returns
/// 升序的分钟网格。
pub fn trading_minutes_of_day(step_minutes: u32) -> Vec<u32> {
    let step = step_minutes.max(1);

    let morning_start = if step == 1 {
        9 * 60 + 30
    } else {
        9 * 60 + 30 + step
    };
    let morning_end = 11 * 60 + 30;
    let afternoon_start = 13 * 60 + step;
    let afternoon_end = 15 * 60;

    let mut minutes: Vec<u32> = (morning_start..=morning_end).step_by(step as usize).collect();
    minutes.extend((afternoon_start..=afternoon_end).step_by(step as usize));
    minutes
}

/// # Summary
/// 时间供给器接口，用于劫持和隔离物理系统时钟。
/// 日期预设（今日/昨日/近一周）必须通过此接口取当前日期。
pub trait TimeProvider: Send + Sync {
    /// 获取当前挂载的时间
    fn now(&self) -> DateTime<Utc>;

    /// 获取当前挂载的日期
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// # Summary
/// 针对普通运行的真实时钟，直接返回操作系统当前时间。
pub struct RealTimeProvider;

impl TimeProvider for RealTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// # Summary
/// 测试与回放专用虚拟时钟，允许主动拨快或回退时间。
///
/// # Invariants
/// - 并发安全：内部利用 `RwLock` 提供多线程安全修改和读取时间的权限。
pub struct FakeClockProvider {
    current_time: RwLock<DateTime<Utc>>,
}

impl FakeClockProvider {
    /// 使用指定的初始时间创建虚拟时钟
    pub fn new(initial_time: DateTime<Utc>) -> Self {
        Self {
            current_time: RwLock::new(initial_time),
        }
    }

    /// 强制修改时钟的当前时间
    pub fn set_time(&self, new_time: DateTime<Utc>) {
        if let Ok(mut time) = self.current_time.write() {
            *time = new_time;
        }
    }
}

impl TimeProvider for FakeClockProvider {
    fn now(&self) -> DateTime<Utc> {
        self.current_time
            .read()
            .map(|t| *t)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}
