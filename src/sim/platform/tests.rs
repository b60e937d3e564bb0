use super::*;

fn feet_on(p: &Platform) -> Rect {
    // 40px-wide player standing flush on the top edge.
    Rect::new(p.rect.x + 10.0, p.rect.y - 1.0, 40.0, 2.0)
}

#[test]
fn unstable_crumbles_after_continuous_standing() {
    let mut p = Platform::unstable(Rect::new(100.0, 500.0, 120.0, 20.0), [90, 70, 50]);
    let feet = feet_on(&p);

    for _ in 0..CRUMBLE_TIME - 1 {
        assert_eq!(p.update(Some(&feet)), None);
        assert!(p.is_solid());
    }
    assert_eq!(p.update(Some(&feet)), Some(PlatformChange::Crumbled));
    assert!(!p.is_solid());
    assert!(p.solid_rect().is_degenerate());
}

#[test]
fn crumble_round_trip_is_repeatable() {
    let mut p = Platform::unstable(Rect::new(0.0, 400.0, 100.0, 20.0), [90, 70, 50]);
    let feet = feet_on(&p);

    for _ in 0..3 {
        for _ in 0..CRUMBLE_TIME {
            p.update(Some(&feet));
        }
        assert!(!p.is_solid());

        // Standing in the gap does nothing while crumbled.
        for _ in 0..RESPAWN_TIME - 1 {
            assert_eq!(p.update(Some(&feet)), None);
        }
        assert_eq!(p.update(None), Some(PlatformChange::Restored));
        assert!(p.is_solid());
        assert_eq!(p.solid_rect(), p.rect);
        match &p.kind {
            PlatformKind::Unstable(c) => assert_eq!(c.stand_timer, 0.0),
            other => panic!("unexpected kind {other:?}"),
        }
    }
}

#[test]
fn stand_timer_decays_at_half_rate() {
    let mut p = Platform::unstable(Rect::new(0.0, 400.0, 100.0, 20.0), [90, 70, 50]);
    let feet = feet_on(&p);

    for _ in 0..10 {
        p.update(Some(&feet));
    }
    for _ in 0..4 {
        p.update(None);
    }
    let PlatformKind::Unstable(c) = &p.kind else {
        panic!("not unstable");
    };
    assert_eq!(c.stand_timer, 8.0);
    assert!(c.shake_amplitude() > 0.0);
}

#[test]
fn feet_above_tolerance_band_do_not_count() {
    let p = Platform::unstable(Rect::new(0.0, 400.0, 100.0, 20.0), [90, 70, 50]);
    let hovering = Rect::new(10.0, 390.0, 40.0, 2.0);
    assert!(!p.is_stood_on(&hovering));
    assert!(p.is_stood_on(&feet_on(&p)));
}

#[test]
fn bouncy_squash_resets_on_landing_and_decays() {
    let mut p = Platform::bouncy(Rect::new(0.0, 400.0, 100.0, 20.0), [200, 80, 200]);
    assert_eq!(p.bounce_power(), Some(BOUNCE_POWER));

    p.on_landed();
    p.update(None);
    let PlatformKind::Bouncy(s) = &p.kind else {
        panic!("not bouncy");
    };
    assert!(s.squash < 1.0 && s.squash > 0.0);
    assert!(s.phase > 0.0);
}

#[test]
fn normal_platform_has_no_state() {
    let mut p = Platform::normal(Rect::new(0.0, 0.0, 10.0, 10.0), [0, 0, 0]);
    assert_eq!(p.update(Some(&Rect::new(0.0, -1.0, 10.0, 2.0))), None);
    assert_eq!(p.bounce_power(), None);
    assert!(p.is_solid());
}
