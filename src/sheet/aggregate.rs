use crate::model::{DateBucket, Summary};
use crate::util::week_key;

/// Roll a bucket up into daily, ISO-week and grand totals.
pub fn aggregate(bucket: &DateBucket) -> Summary {
    let mut summary = Summary::default();

    for (date, entries) in bucket.iter() {
        let day_total: u64 = entries.iter().map(|e| u64::from(e.minutes)).sum();

        *summary.daily.entry(*date).or_insert(0) += day_total;
        *summary.weekly.entry(week_key(*date)).or_insert(0) += day_total;
        summary.grand_total += day_total;
    }

    summary.total = summary.daily.clone();
    summary
}
