#[cfg(test)]
mod tests {
    use camwatch::libs::analyzer::{analyze, ArchiveReport, Fragment, GAP_NOISE_THRESHOLD, MIN_SEGMENT_WIDTH_PCT};
    use chrono::{Local, TimeZone};

    /// Epoch second of local midnight for a fixed date, so day bucketing
    /// behaves the same regardless of the machine's timezone.
    fn day_start(year: i32, month: u32, day: u32) -> i64 {
        Local
            .with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .expect("test date has a local midnight")
            .timestamp()
    }

    fn frag(since: i64, till: i64) -> Fragment {
        Fragment { since, till }
    }

    #[test]
    fn test_empty_input_returns_zero_report() {
        let report = analyze(&[], day_start(2026, 3, 12));
        assert_eq!(report, ArchiveReport::empty());
        assert_eq!(report.total_fragments, 0);
        assert_eq!(report.coverage_pct, 0.0);
        assert!(report.daily.is_empty());
    }

    #[test]
    fn test_single_fragment_covers_its_own_span() {
        let ds = day_start(2026, 3, 10);
        let report = analyze(&[frag(ds, ds + 3600)], ds + 3600);

        assert_eq!(report.total_fragments, 1);
        assert_eq!(report.total_span, 3600);
        assert_eq!(report.total_recorded, 3600);
        assert_eq!(report.coverage_pct, 100.0);
        assert_eq!(report.gaps_count, 0);
        assert_eq!(report.max_gap, 0);
        assert_eq!(report.total_gap_time, 0);
    }

    #[test]
    fn test_gap_above_noise_threshold_is_counted() {
        let ds = day_start(2026, 3, 10);
        let report = analyze(&[frag(ds, ds + 1000), frag(ds + 1200, ds + 2000)], ds + 86400);

        assert_eq!(report.gaps_count, 1);
        assert_eq!(report.max_gap, 200);
        assert_eq!(report.total_gap_time, 200);
    }

    #[test]
    fn test_short_discontinuity_is_noise() {
        let ds = day_start(2026, 3, 10);
        let report = analyze(&[frag(ds, ds + 1000), frag(ds + 1050, ds + 2000)], ds + 86400);

        assert_eq!(report.gaps_count, 0);
        assert_eq!(report.max_gap, 0);
    }

    #[test]
    fn test_gap_exactly_at_threshold_is_noise() {
        let ds = day_start(2026, 3, 10);
        let report = analyze(
            &[frag(ds, ds + 1000), frag(ds + 1000 + GAP_NOISE_THRESHOLD, ds + 2000)],
            ds + 86400,
        );
        assert_eq!(report.gaps_count, 0);

        let report = analyze(
            &[frag(ds, ds + 1000), frag(ds + 1001 + GAP_NOISE_THRESHOLD, ds + 2000)],
            ds + 86400,
        );
        assert_eq!(report.gaps_count, 1);
        assert_eq!(report.max_gap, GAP_NOISE_THRESHOLD + 1);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let ds = day_start(2026, 3, 10);
        let sorted = [frag(ds, ds + 600), frag(ds + 1000, ds + 1600), frag(ds + 2000, ds + 2600)];
        let shuffled = [sorted[2], sorted[0], sorted[1]];
        let now = ds + 86400;

        assert_eq!(analyze(&sorted, now), analyze(&shuffled, now));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let ds = day_start(2026, 3, 10);
        let fragments = [frag(ds, ds + 600), frag(ds + 1000, ds + 1600)];
        let now = ds + 7200;

        assert_eq!(analyze(&fragments, now), analyze(&fragments, now));
    }

    #[test]
    fn test_span_ends_at_till_of_last_fragment_by_start() {
        // The window end comes from the fragment that starts last, even when
        // an earlier fragment runs past it. Overlaps are not deduplicated, so
        // coverage can exceed 100%.
        let ds = day_start(2026, 3, 10);
        let report = analyze(&[frag(ds, ds + 1000), frag(ds + 100, ds + 500)], ds + 86400);

        assert_eq!(report.total_span, 500);
        assert_eq!(report.total_recorded, 1400);
        assert_eq!(report.coverage_pct, 280.0);
    }

    #[test]
    fn test_depth_days_measured_from_oldest_fragment() {
        let ds = day_start(2026, 3, 10);
        let now = ds + 3 * 86400;
        let report = analyze(&[frag(ds, ds + 600)], now);

        assert_eq!(report.depth_days, 3.0);
    }

    #[test]
    fn test_avg_fragment_is_mean_duration() {
        let ds = day_start(2026, 3, 10);
        let report = analyze(&[frag(ds, ds + 100), frag(ds + 200, ds + 500)], ds + 86400);

        assert_eq!(report.avg_fragment, 200.0);
    }

    #[test]
    fn test_current_day_denominator_clamps_to_now() {
        // Six recorded hours out of six elapsed hours is full coverage for
        // the still-running day, not 25% of a full day.
        let ds = day_start(2026, 3, 10);
        let now = ds + 6 * 3600;
        let report = analyze(&[frag(ds, now)], now);

        assert_eq!(report.daily.len(), 1);
        assert_eq!(report.daily[0].coverage_pct, 100.0);
        assert_eq!(report.daily[0].recorded, 6 * 3600);
        assert_eq!(report.daily[0].recorded_h, 6.0);
    }

    #[test]
    fn test_fragments_bucket_by_local_start_date() {
        let d1 = day_start(2026, 3, 10);
        let d2 = day_start(2026, 3, 11);
        let report = analyze(&[frag(d1 + 3600, d1 + 7200), frag(d2 + 3600, d2 + 7200)], d2 + 86400);

        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.daily[0].date, "2026-03-10");
        assert_eq!(report.daily[1].date, "2026-03-11");
        assert_eq!(report.daily[0].fragments, 1);
        assert_eq!(report.daily[1].fragments, 1);
    }

    #[test]
    fn test_gap_belongs_to_the_day_recording_resumed() {
        let d1 = day_start(2026, 3, 10);
        let d2 = day_start(2026, 3, 11);
        // Recording stops an hour before midnight and resumes an hour after.
        let report = analyze(&[frag(d1, d2 - 3600), frag(d2 + 3600, d2 + 7200)], d2 + 86400);

        assert_eq!(report.daily[0].gaps_count, 0);
        assert_eq!(report.daily[1].gaps_count, 1);
        assert_eq!(report.daily[1].max_gap, 7200);
    }

    #[test]
    fn test_overnight_fragment_credited_to_start_day_but_clipped_on_timeline() {
        let d2 = day_start(2026, 3, 11);
        // 23:00 to 01:00 the next day.
        let report = analyze(&[frag(d2 - 3600, d2 + 3600)], d2 + 86400);

        assert_eq!(report.daily.len(), 1);
        let day = &report.daily[0];
        assert_eq!(day.date, "2026-03-10");
        assert_eq!(day.recorded, 7200);

        assert_eq!(day.timeline.len(), 1);
        let seg = &day.timeline[0];
        assert_eq!(seg.left, 95.83);
        assert_eq!(seg.width, 4.17);
    }

    #[test]
    fn test_timeline_segment_width_has_a_floor() {
        let ds = day_start(2026, 3, 10);
        let report = analyze(&[frag(ds + 3600, ds + 3610)], ds + 86400);

        let seg = &report.daily[0].timeline[0];
        assert_eq!(seg.width, MIN_SEGMENT_WIDTH_PCT);
        assert_eq!(seg.left, 4.17);
        assert!(seg.title.contains("10 sec"));
    }

    #[test]
    fn test_zero_length_fragment_has_no_timeline_segment() {
        let ds = day_start(2026, 3, 10);
        let report = analyze(&[frag(ds + 3600, ds + 3600)], ds + 86400);

        assert_eq!(report.total_fragments, 1);
        assert_eq!(report.daily[0].fragments, 1);
        assert_eq!(report.daily[0].recorded, 0);
        assert!(report.daily[0].timeline.is_empty());
    }

    #[test]
    fn test_inverted_fragment_flows_through_arithmetic() {
        // Malformed source data is reported as-is rather than rejected.
        let ds = day_start(2026, 3, 10);
        let report = analyze(&[frag(ds + 100, ds)], ds + 86400);

        assert_eq!(report.total_fragments, 1);
        assert_eq!(report.total_recorded, -100);
        assert_eq!(report.total_span, -100);
        assert!(report.daily[0].timeline.is_empty());
    }

    #[test]
    fn test_coverage_zero_when_span_is_zero() {
        let ds = day_start(2026, 3, 10);
        let report = analyze(&[frag(ds, ds)], ds + 86400);

        assert_eq!(report.total_span, 0);
        assert_eq!(report.coverage_pct, 0.0);
    }

    #[test]
    fn test_week_of_full_coverage() {
        let d1 = day_start(2026, 3, 9);
        let now = d1 + 7 * 86400;
        let fragments: Vec<Fragment> = (0..7)
            .map(|d| frag(d1 + d * 86400, d1 + (d + 1) * 86400))
            .collect();
        let report = analyze(&fragments, now);

        assert_eq!(report.total_fragments, 7);
        assert_eq!(report.coverage_pct, 100.0);
        assert_eq!(report.gaps_count, 0);
        assert_eq!(report.depth_days, 7.0);
        assert_eq!(report.daily.len(), 7);
        for day in &report.daily {
            assert_eq!(day.coverage_pct, 100.0);
            assert_eq!(day.recorded_h, 24.0);
        }
    }
}
