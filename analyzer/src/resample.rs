//! Calendar resampling of a single series

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Last calendar day of the month containing `date`
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

/// Last present value of each calendar month, labelled by month end.
///
/// Every month between the first and last date gets a bucket; months
/// without data are `None`.
pub fn monthly_last(dates: &[NaiveDateTime], values: &[Option<f64>]) -> Vec<(NaiveDate, Option<f64>)> {
    let (first, last) = match (dates.first(), dates.last()) {
        (Some(f), Some(l)) => (f.date(), l.date()),
        _ => return Vec::new(),
    };

    let mut buckets: Vec<(NaiveDate, Option<f64>)> = Vec::new();
    let mut label = month_end(first);
    let end = month_end(last);
    while label <= end {
        buckets.push((label, None));
        label = match label.succ_opt() {
            Some(next) => month_end(next),
            None => break,
        };
    }

    let month_key = |d: NaiveDate| d.year() * 12 + d.month() as i32;
    let base = month_key(first);
    for (date, value) in dates.iter().zip(values) {
        if let Some(v) = value {
            let slot = (month_key(date.date()) - base) as usize;
            if let Some(bucket) = buckets.get_mut(slot) {
                bucket.1 = Some(*v);
            }
        }
    }
    buckets
}

/// Daily calendar series of last-per-day values with linear interpolation
/// across gaps.
///
/// Leading days without a value are dropped; trailing gaps repeat the last
/// value.
pub fn daily_interpolated(dates: &[NaiveDateTime], values: &[Option<f64>]) -> Vec<(NaiveDate, f64)> {
    let (first, last) = match (dates.first(), dates.last()) {
        (Some(f), Some(l)) => (f.date(), l.date()),
        _ => return Vec::new(),
    };

    let days = (last - first).num_days() as usize + 1;
    let mut daily: Vec<Option<f64>> = vec![None; days];
    for (date, value) in dates.iter().zip(values) {
        if let Some(v) = value {
            daily[(date.date() - first).num_days() as usize] = Some(*v);
        }
    }

    let interpolated = interpolate_linear(&daily);
    interpolated
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (first + Duration::days(i as i64), v)))
        .collect()
}

/// Fill interior gaps linearly by position and repeat the last value over
/// trailing gaps. Leading gaps stay empty.
pub fn interpolate_linear(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = values.to_vec();
    let mut prev: Option<(usize, f64)> = None;
    for i in 0..values.len() {
        if let Some(v) = values[i] {
            if let Some((j, pv)) = prev {
                let span = (i - j) as f64;
                for (k, cell) in out.iter_mut().enumerate().take(i).skip(j + 1) {
                    *cell = Some(pv + (v - pv) * (k - j) as f64 / span);
                }
            }
            prev = Some((i, v));
        }
    }
    if let Some((j, pv)) = prev {
        for cell in out.iter_mut().skip(j + 1) {
            *cell = Some(pv);
        }
    }
    out
}
