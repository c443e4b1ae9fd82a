//! Pure construction of the gallery view from image records.

use crate::domain::entities::{
    CARDS_PER_ROW, Card, CycleId, GalleryView, ImageRecord, Placeholder, PlaceholderId,
    RatingControl, Row,
};

/// Builds one card from a record.
#[must_use]
pub fn build_card(cycle: CycleId, index: usize, record: &ImageRecord) -> Card {
    Card {
        placeholder: Placeholder::new(
            PlaceholderId::new(cycle, index),
            record.image.clone(),
            record.description.clone(),
        ),
        rating: RatingControl::new(record.id.clone(), record.rating),
        caption: record.caption(),
    }
}

/// Builds the full grid.
///
/// A new row starts at every index divisible by three; each card goes into
/// the most recently started row.
#[must_use]
pub fn build_view(cycle: CycleId, records: &[ImageRecord]) -> GalleryView {
    let mut rows: Vec<Row> = Vec::with_capacity(records.len().div_ceil(CARDS_PER_ROW));

    for (index, record) in records.iter().enumerate() {
        if index % CARDS_PER_ROW == 0 {
            rows.push(Row::default());
        }
        if let Some(row) = rows.last_mut() {
            row.cards.push(build_card(cycle, index, record));
        }
    }

    GalleryView { cycle, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{PIXEL_PLACEHOLDER, Rating};
    use test_case::test_case;

    fn records(count: usize) -> Vec<ImageRecord> {
        (0..count)
            .map(|i| {
                ImageRecord::new(
                    format!("id{i}"),
                    format!("img{i}.jpg"),
                    format!("desc {i}"),
                    Rating::new(u8::try_from(i % 6).unwrap()),
                )
            })
            .collect()
    }

    #[test_case(0, 0 ; "empty")]
    #[test_case(1, 1 ; "one")]
    #[test_case(3, 1 ; "exactly_one_row")]
    #[test_case(4, 2 ; "spills_into_second_row")]
    #[test_case(7, 3 ; "seven")]
    fn test_row_count(count: usize, expected_rows: usize) {
        let view = build_view(CycleId(1), &records(count));
        assert_eq!(view.rows.len(), expected_rows);
        assert_eq!(view.card_count(), count);
    }

    #[test]
    fn test_rows_hold_consecutive_records() {
        let input = records(8);
        let view = build_view(CycleId(1), &input);

        for (k, row) in view.rows.iter().enumerate() {
            let ids: Vec<&str> = row.cards.iter().map(|c| c.record_id().as_str()).collect();
            let expected: Vec<&str> = input
                .iter()
                .skip(k * 3)
                .take(3)
                .map(|r| r.id.as_str())
                .collect();
            assert_eq!(ids, expected);
        }
    }

    #[test_case(0 ; "zero")]
    #[test_case(1 ; "one")]
    #[test_case(2 ; "two")]
    #[test_case(3 ; "three")]
    #[test_case(4 ; "four")]
    #[test_case(5 ; "five")]
    fn test_star_fill(rating: u8) {
        let record = ImageRecord::new("a", "x.jpg", "cat", Rating::new(rating));
        let card = build_card(CycleId(1), 0, &record);

        for option in &card.rating.options {
            assert_eq!(option.filled, option.value <= rating, "star {}", option.value);
        }
        assert_eq!(card.rating.filled_count(), usize::from(rating));
    }

    #[test]
    fn test_single_record_scenario() {
        let input = vec![ImageRecord::new("a", "x.jpg", "cat", Rating::new(3))];
        let view = build_view(CycleId(1), &input);

        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.card_count(), 1);

        let card = &view.rows[0].cards[0];
        assert_eq!(card.caption, "cat (3)");
        assert_eq!(card.placeholder.src(), PIXEL_PLACEHOLDER);
        assert_eq!(card.placeholder.deferred_src, "x.jpg");
        assert_eq!(card.placeholder.alt, "cat");

        let filled: Vec<bool> = card.rating.options.iter().map(|o| o.filled).collect();
        assert_eq!(filled, vec![true, true, true, false, false]);
    }

    #[test]
    fn test_placeholder_ids_follow_input_index() {
        let view = build_view(CycleId(4), &records(5));
        let ids: Vec<PlaceholderId> = view.placeholders().map(|p| p.id).collect();
        assert_eq!(ids, (0..5).map(|i| PlaceholderId::new(CycleId(4), i)).collect::<Vec<_>>());
    }

    #[test]
    fn test_markup_rows() {
        let node = build_view(CycleId(1), &records(5)).to_node();
        let rows = node.select_class("row");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].children().len(), 3);
        assert_eq!(rows[1].children().len(), 2);
        assert_eq!(node.select_class("lazy-image").len(), 5);
    }
}
