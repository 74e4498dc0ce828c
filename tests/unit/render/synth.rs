use image::Rgba;

use super::*;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

fn solid(w: u32, h: u32) -> FrameSynthesizer {
    let img = RgbaImage::from_pixel(w, h, RED);
    FrameSynthesizer::new(SourceImage::from_rgba(img, Size::new(w, h)).unwrap())
}

/// Left half red, right half blue.
fn split(w: u32, h: u32) -> FrameSynthesizer {
    let img = RgbaImage::from_fn(w, h, |x, _| if x < w / 2 { RED } else { BLUE });
    FrameSynthesizer::new(SourceImage::from_rgba(img, Size::new(w, h)).unwrap())
}

fn reddish(px: [u8; 4]) -> bool {
    px[3] > 200 && px[0] > px[2]
}

fn bluish(px: [u8; 4]) -> bool {
    px[3] > 200 && px[2] > px[0]
}

#[test]
fn every_frame_has_canvas_size() {
    let s = solid(30, 20);
    for i in 0..40 {
        let t = f64::from(i) * 0.05;
        let f = s.synthesize(t, 2.0);
        assert_eq!(f.size(), Size::new(30, 20), "t = {t}");
        assert_eq!(f.data.len(), Size::new(30, 20).rgba_len());
    }
}

#[test]
fn face_on_frames_span_full_width() {
    let s = solid(200, 8);
    assert_eq!(s.synthesize(0.0, 1.0).opaque_columns(), Some((0, 200)));
    assert_eq!(s.synthesize(0.5, 1.0).opaque_columns(), Some((0, 200)));
}

#[test]
fn edge_on_frames_keep_a_centered_sliver() {
    let s = solid(200, 8);
    for t in [0.25, 0.75] {
        let f = s.synthesize(t, 1.0);
        assert_eq!(f.opaque_columns(), Some((99, 100)), "t = {t}");
        assert!(reddish(f.pixel(99, 4).unwrap()));
        assert_eq!(f.pixel(98, 4), Some([0, 0, 0, 0]));
        assert_eq!(f.pixel(100, 4), Some([0, 0, 0, 0]));
    }
}

#[test]
fn foreshortened_card_is_centered_on_transparency() {
    let s = solid(200, 4);
    // 72° -> 62px wide, offset (200 - 62) / 2 = 69.
    let f = s.synthesize(0.2, 1.0);
    assert_eq!(f.opaque_columns(), Some((69, 131)));
    assert_eq!(f.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(f.pixel(199, 3), Some([0, 0, 0, 0]));
}

#[test]
fn odd_remainder_leans_left() {
    // 7 wide at 60° -> 4 wide, offset (7 - 4) / 2 = 1.
    let s = solid(7, 2);
    let f = s.synthesize_pose(Pose::from_angle(60.0));
    assert_eq!(f.opaque_columns(), Some((1, 5)));
}

#[test]
fn back_face_is_mirror_of_front_face() {
    let s = split(40, 6);
    for (back, front) in [(120.0, 60.0), (180.0, 0.0), (225.0, -45.0), (100.0, 80.0)] {
        let back_card = s.card(Pose::from_angle(back));
        let mut front_card = s.card(Pose::from_angle(front));
        image::imageops::flip_horizontal_in_place(&mut front_card);
        assert_eq!(back_card, front_card, "back {back} vs front {front}");
    }
}

#[test]
fn front_facing_angles_are_not_mirrored() {
    let s = split(40, 6);
    for angle in [0.0, 45.0, 90.0, 270.0, 300.0, 359.0] {
        let card = s.card(Pose::from_angle(angle));
        let last = card.width() - 1;
        if card.width() > 1 {
            assert!(reddish(card.get_pixel(0, 3).0), "angle {angle}");
            assert!(bluish(card.get_pixel(last, 3).0), "angle {angle}");
        }
    }
}

#[test]
fn back_facing_angles_are_mirrored() {
    let s = split(40, 6);
    for angle in [135.0, 180.0, 200.0, 260.0] {
        let card = s.card(Pose::from_angle(angle));
        let last = card.width() - 1;
        assert!(bluish(card.get_pixel(0, 3).0), "angle {angle}");
        assert!(reddish(card.get_pixel(last, 3).0), "angle {angle}");
    }
}

#[test]
fn mirror_flips_exactly_at_ninety_degrees() {
    let s = split(40, 6);
    let f_before = s.synthesize_pose(Pose::from_angle(60.0));
    let f_after = s.synthesize_pose(Pose::from_angle(120.0));
    // Same footprint, opposite colors at the card's left edge.
    assert_eq!(f_before.opaque_columns(), f_after.opaque_columns());
    let (left, _) = f_before.opaque_columns().unwrap();
    assert!(reddish(f_before.pixel(left, 3).unwrap()));
    assert!(bluish(f_after.pixel(left, 3).unwrap()));
}

#[test]
fn synthesis_is_deterministic() {
    let s = split(64, 16);
    for t in [0.0, 0.13, 0.5, 0.77, 1.9] {
        assert_eq!(s.synthesize(t, 2.0), s.synthesize(t, 2.0), "t = {t}");
    }
}

#[test]
fn face_on_frame_reproduces_translucent_source() {
    let img = RgbaImage::from_fn(5, 3, |x, y| Rgba([x as u8 * 40, y as u8 * 60, 9, 30 + x as u8]));
    let s = FrameSynthesizer::new(SourceImage::from_rgba(img.clone(), Size::new(5, 3)).unwrap());
    let f = s.synthesize(0.0, 2.0);
    assert_eq!(f.into_image().unwrap(), img);
}

#[test]
fn squeezed_card_keeps_clean_edges_over_transparency() {
    // Red block on fully transparent black.
    let img = RgbaImage::from_fn(40, 20, |x, y| {
        if (10..30).contains(&x) && (5..15).contains(&y) {
            RED
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    let s = FrameSynthesizer::new(SourceImage::from_rgba(img, Size::new(40, 20)).unwrap());

    for angle in [30.0, 72.0, 135.0, 250.0] {
        let card = s.card(Pose::from_angle(angle));
        for px in card.pixels() {
            if px[3] == 0 {
                continue;
            }
            assert!(
                px[0] >= 250 && px[1] <= 5 && px[2] <= 5,
                "angle {angle}: dark edge pixel {px:?}"
            );
        }
    }
}
