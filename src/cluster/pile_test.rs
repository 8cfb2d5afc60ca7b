#[cfg(test)]
mod tests {
    use crate::cluster::testing::FlatView;
    use crate::cluster::*;
    use crate::projection::Projection;

    fn marker(id: u64, lat: f64, lng: f64) -> Marker {
        Marker::new(id, LatLng::new(lat, lng))
    }

    #[test]
    fn test_weighted_centroid() {
        let view = FlatView::at_zoom(0);
        let a = marker(1, 0.0, 0.0);
        let b = marker(2, 0.0, 30.0);
        let c = marker(3, -30.0, 0.0);

        let mut pile = Pile::new(PileId(0), a, &view);
        assert_eq!(pile.centroid(), ScreenPoint::new(0.0, 0.0));

        pile.add_marker(b, view.project(&b.position), &view);
        assert_eq!(pile.centroid(), ScreenPoint::new(15.0, 0.0));

        pile.add_marker(c, view.project(&c.position), &view);
        assert_eq!(pile.centroid(), ScreenPoint::new(10.0, 10.0));
        assert_eq!(pile.position(), LatLng::new(-10.0, 10.0));
        assert_eq!(pile.size(), 3);
        assert_eq!(pile.icon(), PileIcon::for_size(3));
    }

    #[test]
    fn test_remove_recomputes_centroid() {
        let view = FlatView::at_zoom(1);
        let a = marker(1, 0.0, 0.0);
        let b = marker(2, 0.0, 10.0);
        let c = marker(3, 10.0, 10.0);

        let mut pile = Pile::new(PileId(7), a, &view);
        pile.add_marker(b, view.project(&b.position), &view);
        pile.add_marker(c, view.project(&c.position), &view);

        assert_eq!(pile.remove_marker(MarkerId(1), &view), Some(a));
        assert!(!pile.has_marker(MarkerId(1)));
        assert_eq!(pile.centroid(), ScreenPoint::new(20.0, -10.0));
        assert_eq!(pile.position(), LatLng::new(5.0, 10.0));
        assert_eq!(pile.first(), Some(&b));

        assert_eq!(pile.remove_marker(MarkerId(1), &view), None);
    }

    #[test]
    fn test_in_bounds_is_strict() {
        let view = FlatView::at_zoom(0);
        let pile = Pile::new(PileId(0), marker(1, 0.0, 0.0), &view);

        assert_eq!(pile.in_bounds(&ScreenPoint::new(3.0, 4.0), 60.0), Some(5.0));
        assert_eq!(pile.in_bounds(&ScreenPoint::new(60.0, 0.0), 60.0), None);
        assert_eq!(pile.in_bounds(&ScreenPoint::new(0.0, 59.5), 60.0), Some(59.5));
    }

    #[test]
    fn test_pile_bounds() {
        let view = FlatView::at_zoom(0);
        let b = marker(2, 4.0, -3.0);
        let mut pile = Pile::new(PileId(0), marker(1, -2.0, 5.0), &view);
        pile.add_marker(b, view.project(&b.position), &view);

        let bounds = pile.bounds().unwrap();
        assert_eq!(bounds.south_west, LatLng::new(-2.0, -3.0));
        assert_eq!(bounds.north_east, LatLng::new(4.0, 5.0));
    }
}
