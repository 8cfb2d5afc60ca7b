/// Visual bucket of a pile icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PileIcon {
    /// Largest pile size drawn with this icon
    pub max_size: usize,
    /// Square icon edge in pixels
    pub icon_size: u32,
    /// Anchor offset (both axes) in pixels
    pub icon_anchor: u32,
    /// Vertical popup offset in pixels
    pub popup_anchor: i32,
}

// sorted by max_size
const ICONS: [PileIcon; 4] = [
    PileIcon::new(1, 25, -8),
    PileIcon::new(2, 55, -14),
    PileIcon::new(10, 65, -18),
    PileIcon::new(20, 75, -22),
];

impl PileIcon {
    const fn new(max_size: usize, icon_size: u32, popup_anchor: i32) -> Self {
        PileIcon {
            max_size,
            icon_size,
            icon_anchor: icon_size / 2,
            popup_anchor,
        }
    }

    /// Picks the icon for a pile of `size` markers
    ///
    /// Sizes past the largest bucket keep the largest icon.
    pub fn for_size(size: usize) -> PileIcon {
        let i = ICONS.partition_point(|icon| icon.max_size < size);
        ICONS[i.min(ICONS.len() - 1)]
    }
}
