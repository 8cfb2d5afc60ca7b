#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_bounds_and_center() {
        let points = vec![
            LatLng::new(59.955982, 30.244759),
            LatLng::new(59.955975, 30.24472),
            LatLng::new(59.96698, 30.244358),
        ];

        let bounds = LatLngBounds::from_points(&points).unwrap();
        assert_eq!(bounds.south_west, LatLng::new(59.955975, 30.244358));
        assert_eq!(bounds.north_east, LatLng::new(59.96698, 30.244759));

        let center = bounds.center();
        assert!((center.lat - 59.9614775).abs() < 1e-9);
        assert!((center.lng - 30.2445585).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_of_nothing() {
        let points: Vec<LatLng> = Vec::new();
        assert!(LatLngBounds::from_points(&points).is_none());
    }

    #[test]
    fn test_screen_mean_and_distance() {
        let a = ScreenPoint::new(0.0, 0.0);
        let b = ScreenPoint::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);

        let mean = ScreenPoint::mean([a, b, ScreenPoint::new(6.0, 2.0)]).unwrap();
        assert_eq!(mean, ScreenPoint::new(3.0, 2.0));
        assert!(ScreenPoint::mean(Vec::<ScreenPoint>::new()).is_none());
    }
}
