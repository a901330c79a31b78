use cgmath::{InnerSpace, MetricSpace};
use proptest::prelude::*;
use stereo_core::{
    nearest_hit, prop_assert_near, resolve, segment_intersection, Billboard, Point3, Ray, Segment,
    SnapKind, SnapTable, Vector3,
};

fn point() -> impl Strategy<Value = Point3> {
    prop::array::uniform3(-5.0f64..=5.0f64).prop_map(Point3::from)
}

proptest! {
    #[test]
    fn resolved_point_is_snap_or_on_edge(
        a in point(),
        b in point(),
        hit in point(),
        extra in prop::collection::vec(point(), 0..8),
    ) {
        prop_assume!(a.distance(b) > 1.0e-2);
        let edge = Segment::new(a, b);
        let mut table = SnapTable::for_solid(&[a, b], &[], 1.0e-6);
        for p in &extra {
            table.push(*p, SnapKind::Vertex);
        }

        let r = resolve(hit, &table, 0.15, &edge);
        match r.snap {
            Some(_) => {
                prop_assert!(r.point.distance(hit) <= 0.15);
                prop_assert!(table.iter().any(|s| s.world == r.point));
                // ни один кандидат не ближе выбранного
                let d = r.point.distance(hit);
                prop_assert!(table.iter().all(|s| s.world.distance(hit) >= d));
            }
            None => {
                prop_assert!(table.iter().all(|s| s.world.distance(hit) > 0.15));
                let t = (r.point - a).dot(b - a) / (b - a).magnitude2();
                prop_assert!((-1.0e-9..=1.0 + 1.0e-9).contains(&t));
                prop_assert_near!(r.point, a + (b - a) * t);
            }
        }
    }

    #[test]
    fn collinear_overlap_returns_overlap_midpoint(
        origin in point(),
        dir in prop::array::uniform3(-1.0f64..=1.0f64),
        len in 0.5f64..=4.0f64,
        s0 in -2.0f64..=6.0f64,
        s1 in -2.0f64..=6.0f64,
    ) {
        let dir = Vector3::from(dir);
        prop_assume!(dir.magnitude() > 0.1);
        let dir = dir.normalize();
        let first = Segment::new(origin, origin + dir * len);
        let second = Segment::new(origin + dir * s0, origin + dir * s1);
        let (lo, hi) = (s0.min(s1).max(0.0), s0.max(s1).min(len));
        prop_assume!((lo - hi).abs() > 1.0e-3);

        let got = segment_intersection(&first, &second, 1.0e-6);
        if lo < hi {
            prop_assert_near!(got.unwrap(), origin + dir * ((lo + hi) / 2.0));
        } else {
            prop_assert!(got.is_none());
        }
    }

    #[test]
    fn ray_through_edge_interior_hits_its_billboard(
        a in point(),
        b in point(),
        t in 0.1f64..=0.9f64,
        eye in prop::array::uniform3(-1.0f64..=1.0f64),
    ) {
        prop_assume!(a.distance(b) > 1.0);
        let target = a + (b - a) * t;
        let eye = Vector3::from(eye);
        prop_assume!(eye.magnitude() > 0.1);
        let camera = target + eye.normalize() * 10.0;
        // камера не должна лежать на прямой ребра
        prop_assume!(eye.normalize().cross((b - a).normalize()).magnitude() > 0.1);

        let bb = Billboard::generate(Segment::new(a, b), camera, 0.075).unwrap();
        let ray = Ray::new(camera, (target - camera).normalize());
        let hit = nearest_hit(&[bb], &ray).unwrap();
        prop_assert!(hit.point.distance(target) < 1.0e-6);
    }
}
