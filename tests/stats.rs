#[cfg(test)]
mod tests {
    use camwatch::api::models::{Camera, DataCenter, MemoryCardState};
    use camwatch::libs::stats::{compute_summary, LONG_OFFLINE_THRESHOLD};

    const NOW: i64 = 1_760_000_000;

    fn camera(uid: &str, vendor: Option<&str>, is_online: bool) -> Camera {
        Camera {
            uid: uid.to_string(),
            name: Some(format!("cam {}", uid)),
            sn: None,
            vendor: vendor.map(str::to_string),
            model: Some("M1".to_string()),
            address: None,
            is_online,
            offline_since: None,
            data_center: Some(DataCenter { name: "dc-east".to_string() }),
            memory_card_state: None,
        }
    }

    #[test]
    fn test_empty_fleet() {
        let summary = compute_summary(&[], NOW);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.online_pct, 0.0);
        assert_eq!(summary.offline_pct, 0.0);
        assert!(summary.by_vendor.is_empty());
        assert!(summary.long_offline.is_empty());
    }

    #[test]
    fn test_online_offline_split() {
        let cameras = vec![
            camera("a", Some("Hikvision"), true),
            camera("b", Some("Hikvision"), true),
            camera("c", Some("Dahua"), false),
        ];
        let summary = compute_summary(&cameras, NOW);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.online, 2);
        assert_eq!(summary.offline, 1);
        assert_eq!(summary.online_pct, 66.7);
        assert_eq!(summary.offline_pct, 33.3);
    }

    #[test]
    fn test_vendor_breakdown_with_unknown_fallback() {
        let cameras = vec![
            camera("a", Some("Hikvision"), true),
            camera("b", None, false),
            camera("c", Some(""), true),
        ];
        let summary = compute_summary(&cameras, NOW);

        assert_eq!(summary.by_vendor["Hikvision"].total, 1);
        assert_eq!(summary.by_vendor["Unknown"].total, 2);
        assert_eq!(summary.by_vendor["Unknown"].online, 1);
        assert_eq!(summary.by_vendor["Unknown"].offline, 1);
    }

    #[test]
    fn test_top_vendors_sorted_by_fleet_share() {
        let mut cameras = Vec::new();
        for i in 0..5 {
            cameras.push(camera(&format!("h{}", i), Some("Hikvision"), true));
        }
        for i in 0..2 {
            cameras.push(camera(&format!("d{}", i), Some("Dahua"), true));
        }
        let summary = compute_summary(&cameras, NOW);

        assert_eq!(summary.top_vendors[0].0, "Hikvision");
        assert_eq!(summary.top_vendors[0].1.total, 5);
        assert_eq!(summary.top_vendors[1].0, "Dahua");
    }

    #[test]
    fn test_memory_issue_detection() {
        let mut bad = camera("bad", Some("Dahua"), true);
        bad.memory_card_state = Some(MemoryCardState { state: "CardError".to_string() });
        let mut ok = camera("ok", Some("Dahua"), true);
        ok.memory_card_state = Some(MemoryCardState { state: "CardOK".to_string() });
        let none = camera("none", Some("Dahua"), true);

        let summary = compute_summary(&[bad, ok, none], NOW);
        assert_eq!(summary.memory_issues.len(), 1);
        assert_eq!(summary.memory_issues[0].uid, "bad");
    }

    #[test]
    fn test_long_offline_threshold_is_strict() {
        let mut at_threshold = camera("edge", None, false);
        at_threshold.offline_since = Some(NOW - LONG_OFFLINE_THRESHOLD);
        let mut over = camera("over", None, false);
        over.offline_since = Some(NOW - LONG_OFFLINE_THRESHOLD - 1);
        let mut unknown_since = camera("unknown", None, false);
        unknown_since.offline_since = None;

        let summary = compute_summary(&[at_threshold, over, unknown_since], NOW);
        assert_eq!(summary.long_offline.len(), 1);
        assert_eq!(summary.long_offline[0].0.uid, "over");
        assert_eq!(summary.long_offline[0].1, LONG_OFFLINE_THRESHOLD + 1);
    }

    #[test]
    fn test_long_offline_sorted_longest_first_and_capped() {
        let mut cameras = Vec::new();
        for i in 0..15 {
            let mut cam = camera(&format!("c{}", i), None, false);
            cam.offline_since = Some(NOW - LONG_OFFLINE_THRESHOLD - 100 * (i as i64 + 1));
            cameras.push(cam);
        }
        let summary = compute_summary(&cameras, NOW);

        assert_eq!(summary.long_offline.len(), 10);
        assert_eq!(summary.long_offline[0].0.uid, "c14");
        assert!(summary.long_offline.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_online_camera_never_listed_as_long_offline() {
        let mut cam = camera("up", None, true);
        cam.offline_since = Some(NOW - 10 * LONG_OFFLINE_THRESHOLD);
        let summary = compute_summary(&[cam], NOW);
        assert!(summary.long_offline.is_empty());
    }
}
