// Frame invariants under random pointer paths, highlight requests and resizes.

mod common;

use ascii_ambient::config::AmbientConfig;
use ascii_ambient::core::{ColorScheme, HighlightRequest, Rect, RendererState};
use common::*;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Event {
    Move(f32, f32),
    Leave,
    Text(&'static str, f32),
    Scheme(bool),
    Drift,
    Idle(u8),
}

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        4 => (0.0f32..450.0, 0.0f32..600.0).prop_map(|(x, y)| Event::Move(x, y)),
        1 => Just(Event::Leave),
        2 => (prop::sample::select(vec!["", "HELLO", "HI", "CONTACT", "A B"]), 0.0f32..1.2)
            .prop_map(|(t, i)| Event::Text(t, i)),
        1 => any::<bool>().prop_map(Event::Scheme),
        1 => Just(Event::Drift),
        1 => (1u8..80).prop_map(Event::Idle),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn brightness_stays_in_unit_range_and_only_decays_or_dissolves(
        events in prop::collection::vec(event(), 1..40),
    ) {
        let cfg = AmbientConfig::default();
        let mut s = state_with(40, 20, cfg.clone());
        let vp = s.viewport();
        s.set_hover_regions([Rect::new(0.0, 0.0, vp.width, vp.height * 0.5)]);
        let mut req = HighlightRequest::default();
        let mut sink = RecordingSink::default();
        let mut now = 0.0;

        let frame = |s: &mut RendererState, now: &mut f64, req: &HighlightRequest, sink: &mut RecordingSink| {
            let before = s.grid().brightness().to_vec();
            let dissolving = s.highlight().fading().is_some();
            *now += FRAME_MS;
            s.step(*now, req, sink);
            let after = s.grid().brightness();
            let dissolving = dissolving || s.highlight().fading().is_some();
            for (i, (&b, &a)) in before.iter().zip(after).enumerate() {
                prop_assert!((0.0..=1.0).contains(&a), "cell {} = {}", i, a);
                if !dissolving {
                    prop_assert!(b - a <= cfg.ambient.fade_step + 1e-6, "cell {} fell {} -> {}", i, b, a);
                }
            }
            prop_assert_eq!(s.grid().len(), 40 * 20);
            prop_assert_eq!(s.spotlight().active().len(), s.grid().len());
            Ok(())
        };

        for ev in events {
            match ev {
                Event::Move(x, y) => s.pointer_moved(x, y, now),
                Event::Leave => s.pointer_left(),
                Event::Text(t, i) => req = HighlightRequest::new(t, i),
                Event::Scheme(dark) => s.set_color_scheme(if dark { ColorScheme::Dark } else { ColorScheme::Light }),
                Event::Drift => s.drift(),
                Event::Idle(n) => {
                    for _ in 0..n {
                        frame(&mut s, &mut now, &req, &mut sink)?;
                    }
                }
            }
            frame(&mut s, &mut now, &req, &mut sink)?;
            prop_assert!(sink.glyphs.iter().all(|g| g.alpha > 0.0 && g.alpha <= 1.0));
        }
    }

    #[test]
    fn any_resize_keeps_buffers_in_step(cols in 0usize..60, rows in 0usize..30) {
        let mut s = state(10, 10);
        let mut sink = RecordingSink::default();
        let req = HighlightRequest::new("HELLO", 1.0);
        s.step(0.0, &req, &mut sink);
        s.resize(viewport_for(cols, rows));
        prop_assert_eq!(s.grid().len(), cols * rows);
        s.step(FRAME_MS, &req, &mut sink);
        prop_assert_eq!(s.grid().brightness().len(), cols * rows);
        prop_assert_eq!(s.spotlight().active().len(), cols * rows);
        prop_assert!(sink.glyphs.len() <= cols * rows);
    }
}
