use binstore_service::pricing;
use chrono::{DateTime, Duration, TimeZone, Utc};

/// 테스트 기준 시점 (등록 시각으로 사용)
fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap()
}

/// 하루마다 원가의 1/7씩 하락하는지 테스트
#[test]
fn test_price_drops_linearly_per_day() {
    let created_at = base_time();

    for day in 0..=6 {
        let now = created_at + Duration::days(day);
        let price = pricing::current_price_at(70.0, created_at, now);
        assert_eq!(
            price,
            70.0 - 10.0 * day as f64,
            "{}일차 가격이 다릅니다.",
            day + 1
        );
    }
}

/// 7일차 이후로는 하한선 1.0에 고정되는지 테스트
#[test]
fn test_price_floor_after_decay_window() {
    let created_at = base_time();

    for day in 7..=30 {
        let now = created_at + Duration::days(day);
        assert_eq!(pricing::current_price_at(70.0, created_at, now), 1.0);
    }
}

/// 하한선 도달 전까지 매일 엄격히 하락하는지 테스트
#[test]
fn test_price_strictly_decreases_before_floor() {
    let created_at = base_time();

    for day in 0..6 {
        let today = pricing::current_price_at(99.99, created_at, created_at + Duration::days(day));
        let tomorrow =
            pricing::current_price_at(99.99, created_at, created_at + Duration::days(day + 1));
        assert!(
            tomorrow < today,
            "{}일차({}) 이후 가격({})이 하락하지 않았습니다.",
            day + 1,
            today,
            tomorrow
        );
    }
}

/// 어떤 경과일에도 가격이 [하한선, 원가] 범위를 벗어나지 않는지 테스트
#[test]
fn test_price_stays_within_bounds() {
    let created_at = base_time();

    for original in [1.0, 3.5, 49.99, 70.0, 1000.0] {
        for day in 0..=60 {
            let price =
                pricing::current_price_at(original, created_at, created_at + Duration::days(day));
            assert!(
                (pricing::PRICE_FLOOR..=original).contains(&price),
                "원가 {} {}일차 가격 {}이 범위를 벗어났습니다.",
                original,
                day,
                price
            );
        }
    }
}

/// 진열 일차가 1일차부터 시작하는지 테스트
#[test]
fn test_day_number_is_one_indexed() {
    let created_at = base_time();

    assert_eq!(pricing::day_number_at(created_at, created_at), 1);
    assert_eq!(
        pricing::day_number_at(created_at, created_at + Duration::days(6)),
        7
    );
    assert_eq!(
        pricing::day_number_at(created_at, created_at + Duration::days(13)),
        14
    );
}

/// 하루가 다 지나기 전에는 가격이 내려가지 않는지 테스트 (경과일은 내림)
#[test]
fn test_partial_day_rounds_down() {
    let created_at = base_time();

    // 23시간 59분: 아직 0일 경과
    let almost_a_day = created_at + Duration::hours(23) + Duration::minutes(59);
    assert_eq!(pricing::current_price_at(70.0, created_at, almost_a_day), 70.0);
    assert_eq!(pricing::day_number_at(created_at, almost_a_day), 1);

    // 84시간(3.5일): 3일 경과로 취급
    let three_and_half_days = created_at + Duration::hours(84);
    assert_eq!(
        pricing::current_price_at(70.0, created_at, three_and_half_days),
        40.0
    );
    assert_eq!(pricing::day_number_at(created_at, three_and_half_days), 4);
}

/// 미래로 등록된 시점도 과거와 동일하게 하락하는지 테스트
/// 경과일 계산이 시간 차의 절대값을 쓰는 기존 동작을 그대로 고정한다.
#[test]
fn test_future_created_at_decays_like_past() {
    let now = base_time();
    let past = now - Duration::days(3);
    let future = now + Duration::days(3);

    assert_eq!(pricing::elapsed_days(past, now), 3);
    assert_eq!(pricing::elapsed_days(future, now), 3);
    assert_eq!(
        pricing::current_price_at(70.0, past, now),
        pricing::current_price_at(70.0, future, now)
    );
    assert_eq!(pricing::current_price_at(70.0, future, now), 40.0);
}

/// 현재 시각 기준 계산이 기준 시점 버전과 일치하는지 테스트
#[test]
fn test_wall_clock_variants_match_reference_time() {
    // 방금 등록: 원가 그대로, 1일차
    let just_created = Utc::now();
    assert_eq!(pricing::current_price(70.0, just_created), 70.0);
    assert_eq!(pricing::day_number(just_created), 1);

    // 10일 전 등록: 하한선 도달, 11일차
    let ten_days_ago = Utc::now() - Duration::days(10);
    assert_eq!(pricing::current_price(70.0, ten_days_ago), 1.0);
    assert_eq!(pricing::day_number(ten_days_ago), 11);
}

/// 대표 예시 가격 테스트 (원가 70: 등록 당일 70, 3일 경과 40, 10일 경과 1.0)
#[test]
fn test_reference_prices() {
    let created_at = base_time();

    assert_eq!(pricing::current_price_at(70.0, created_at, created_at), 70.0);
    assert_eq!(
        pricing::current_price_at(70.0, created_at, created_at + Duration::days(3)),
        40.0
    );
    assert_eq!(
        pricing::current_price_at(70.0, created_at, created_at + Duration::days(10)),
        1.0
    );
}
