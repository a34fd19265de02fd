use chrono::NaiveDate;
use kanpan_core::common::Period;
use kanpan_core::market::port::{DayQuery, MarketDataProvider, MinuteQuery, SnapshotQuery};
use kanpan_synth::provider::SynthProvider;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[tokio::test]
async fn test_minute_fetch_idempotent() {
    let provider = SynthProvider::new();
    let query = MinuteQuery {
        start_date: d(2024, 1, 5),
        end_date: d(2024, 1, 5),
        exponent_id: 1,
        period: Period::Minute5,
        field_list: "time,open,high,low,close".to_string(),
    };

    let a = provider.fetch_minute_series(&query).await.unwrap();
    let b = provider.fetch_minute_series(&query).await.unwrap();
    assert_eq!(a.len(), 48);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );

    // 不同指数的种子不同
    let other = provider
        .fetch_minute_series(&MinuteQuery {
            exponent_id: 3,
            ..query
        })
        .await
        .unwrap();
    assert_ne!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&other).unwrap()
    );
}

#[tokio::test]
async fn test_day_fetch_covers_all_ids() {
    let provider = SynthProvider::new();
    let query = DayQuery {
        start_date: d(2024, 1, 1),
        end_date: d(2024, 1, 5),
        exponent_ids: vec![3, 12],
        field_list: "close".to_string(),
    };
    let records = provider.fetch_day_series(&query).await.unwrap();
    // 该周 5 个交易日 × 2 个指数
    assert_eq!(records.len(), 10);
    assert!(
        records
            .iter()
            .any(|r| r.get("exponentId") == Some(&serde_json::json!(12)))
    );
}

#[tokio::test]
async fn test_snapshot_fetch_has_pct_fields() {
    let provider = SynthProvider::new();
    let query = SnapshotQuery {
        deal_date: d(2024, 1, 5),
        field_list: "code,pctChg,close,preClose".to_string(),
        start_with: None,
    };
    let records = provider.fetch_stock_snapshot(&query).await.unwrap();
    assert!(!records.is_empty());
    let with_pct = records.iter().filter(|r| r.contains_key("pctChg")).count();
    // 绝大多数记录带涨跌幅，个别停牌记录没有
    assert!(with_pct > records.len() / 2);
}
