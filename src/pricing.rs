/// 시간 경과 가격 하락 계산
/// 등록 후 하루가 지날 때마다 원가의 1/7씩 하락하고, 최저 1.0 아래로는 내려가지 않는다.
// region:    --- Imports
use chrono::{DateTime, Utc};

// endregion: --- Imports

// region:    --- Constants

/// 가격이 바닥까지 내려가는 데 걸리는 일수 (하루 하락분 = 원가 / DECAY_DAYS)
pub const DECAY_DAYS: i64 = 7;

/// 하락 가격의 하한선
pub const PRICE_FLOOR: f64 = 1.0;

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

// endregion: --- Constants

// region:    --- Price Decay

/// 등록 시점과 기준 시점 사이의 경과 일수(내림)
/// 시간 차의 절대값을 쓰기 때문에 미래로 등록된 시점도 과거와 동일하게 계산된다.
pub fn elapsed_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff_millis = (now - created_at).num_milliseconds().abs();
    diff_millis / MILLIS_PER_DAY
}

/// 기준 시점의 하락 가격 계산
pub fn current_price_at(
    original_price: f64,
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> f64 {
    let drop_per_day = original_price / DECAY_DAYS as f64;
    let dropped = original_price - drop_per_day * elapsed_days(created_at, now) as f64;
    dropped.max(PRICE_FLOOR)
}

/// 현재 시각 기준 하락 가격 계산
/// 벽시계 시간의 함수이므로 표시할 때마다 다시 계산해야 하고, 캐싱하지 않는다.
pub fn current_price(original_price: f64, created_at: DateTime<Utc>) -> f64 {
    current_price_at(original_price, created_at, Utc::now())
}

/// 기준 시점의 진열 일차 (등록 당일이 1일차)
pub fn day_number_at(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    elapsed_days(created_at, now) + 1
}

/// 현재 시각 기준 진열 일차
pub fn day_number(created_at: DateTime<Utc>) -> i64 {
    day_number_at(created_at, Utc::now())
}

// endregion: --- Price Decay
