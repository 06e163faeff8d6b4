//! Property tests: decoding what was encoded reproduces board items.

use kisexp_codec::{Atom, Record};
use kisexp_kicad::{AtPos, Board, Net, TrackArc, TrackSegment, Via, Xy};
use proptest::prelude::*;

fn millimetres() -> impl Strategy<Value = f64> {
    (-300_000i32..300_000).prop_map(|n| f64::from(n) / 1000.0)
}

fn xy() -> impl Strategy<Value = Xy> {
    (millimetres(), millimetres()).prop_map(|(x, y)| Xy::new(x, y))
}

fn copper_layer() -> impl Strategy<Value = String> {
    prop_oneof![Just("F.Cu"), Just("B.Cu"), Just("In1.Cu"), Just("In2.Cu")].prop_map(String::from)
}

fn width() -> impl Strategy<Value = f64> {
    (1i32..5000).prop_map(|n| f64::from(n) / 1000.0)
}

fn segment() -> impl Strategy<Value = TrackSegment> {
    (xy(), xy(), width(), copper_layer(), any::<bool>(), 0i64..64).prop_map(
        |(start, end, width, layer, locked, net)| TrackSegment {
            start,
            end,
            width,
            layer,
            locked,
            net,
            ..TrackSegment::default()
        },
    )
}

fn arc() -> impl Strategy<Value = TrackArc> {
    (xy(), xy(), xy(), width(), copper_layer(), 0i64..64).prop_map(
        |(start, mid, end, width, layer, net)| TrackArc {
            start,
            mid,
            end,
            width,
            layer,
            net,
            ..TrackArc::default()
        },
    )
}

fn via() -> impl Strategy<Value = Via> {
    (
        proptest::option::of(prop_oneof![Just("blind"), Just("micro")]),
        any::<bool>(),
        xy(),
        width(),
        any::<bool>(),
        any::<bool>(),
        0i64..64,
    )
        .prop_map(|(via_type, locked, at, size, free, remove_unused_layers, net)| Via {
            via_type: via_type.map(Atom::new),
            locked,
            at: AtPos::new(at.x, at.y),
            size,
            free,
            remove_unused_layers,
            net,
            ..Via::default()
        })
}

fn board() -> impl Strategy<Value = Board> {
    (
        proptest::collection::vec(segment(), 0..6),
        proptest::collection::vec(via(), 0..4),
        proptest::collection::vec(arc(), 0..3),
        proptest::collection::vec("[A-Za-z0-9/_+-]{1,10}", 0..5),
    )
        .prop_map(|(track_segments, vias, track_arcs, names)| Board {
            nets: names
                .into_iter()
                .zip(1..)
                .map(|(name, index)| Net { index, name })
                .collect(),
            track_segments,
            vias,
            track_arcs,
            ..Board::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn segments_round_trip(segment in segment()) {
        prop_assert_eq!(TrackSegment::parse(&segment.serialize().unwrap()).unwrap(), segment);
    }

    #[test]
    fn vias_round_trip(via in via()) {
        prop_assert_eq!(Via::parse(&via.serialize().unwrap()).unwrap(), via);
    }

    #[test]
    fn rotation_reads_back_normalized(x in millimetres(), y in millimetres(), turns in -3i32..3, degrees in 0i32..360) {
        let at = AtPos { rotation: f64::from(turns * 360 + degrees), ..AtPos::new(x, y) };
        let back = AtPos::parse(&at.serialize().unwrap()).unwrap();
        prop_assert_eq!(back.rotation, f64::from(degrees));
        prop_assert_eq!((back.x, back.y), (x, y));
    }

    #[test]
    fn boards_reach_a_fixed_point(board in board()) {
        let first = board.serialize().unwrap();
        let decoded = Board::parse(&first).unwrap();
        prop_assert_eq!(&decoded, &board);
        prop_assert_eq!(decoded.serialize().unwrap(), first);
    }
}
