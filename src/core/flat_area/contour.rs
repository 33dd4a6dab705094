use crate::domain::model::ContourSummary;
use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

const BLOCKED: Luma<u8> = Luma([0]);
const OPEN: Luma<u8> = Luma([255]);

/// 只取最外層輪廓（外框且沒有父輪廓），內部孔洞與其中的輪廓都忽略
pub fn external_contours(binary: &GrayImage) -> Vec<Contour<i32>> {
    find_contours::<i32>(binary)
        .into_iter()
        .filter(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none())
        .collect()
}

/// 鞋帶公式計算多邊形面積（px²）；少於 3 點時為 0
pub fn contour_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let twice_area: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(p, q)| i64::from(p.x) * i64::from(q.y) - i64::from(q.x) * i64::from(p.y))
        .sum();

    (twice_area as f64 / 2.0).abs()
}

pub fn bounding_box(points: &[Point<i32>]) -> (i32, i32, i32, i32) {
    points.iter().fold(
        (i32::MAX, i32::MAX, i32::MIN, i32::MIN),
        |(min_x, min_y, max_x, max_y), p| {
            (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
        },
    )
}

/// 將輪廓內部與邊界填成 `value`
pub fn fill_contour(mask: &mut GrayImage, points: &[Point<i32>], value: Luma<u8>) {
    let mut polygon: Vec<Point<i32>> = Vec::with_capacity(points.len());
    for &p in points {
        if polygon.last() != Some(&p) {
            polygon.push(p);
        }
    }
    while polygon.len() > 1 && polygon.first() == polygon.last() {
        polygon.pop();
    }

    // draw_polygon_mut 需要至少三個不同頂點
    if polygon.len() >= 3 {
        draw_polygon_mut(mask, &polygon, value);
    }

    let (width, height) = mask.dimensions();
    for p in points {
        if p.x >= 0 && p.y >= 0 && (p.x as u32) < width && (p.y as u32) < height {
            mask.put_pixel(p.x as u32, p.y as u32, value);
        }
    }
}

/// 建立遮罩：全白，面積低於 `min_area` 的輪廓塗黑
pub fn build_mask(
    width: u32,
    height: u32,
    contours: &[Contour<i32>],
    min_area: f64,
) -> (GrayImage, Vec<ContourSummary>) {
    let mut mask = GrayImage::from_pixel(width, height, OPEN);
    let mut summaries = Vec::with_capacity(contours.len());

    for contour in contours {
        let area = contour_area(&contour.points);
        let blocked = area < min_area;

        if blocked {
            fill_contour(&mut mask, &contour.points, BLOCKED);
        }

        tracing::debug!(
            area,
            points = contour.points.len(),
            blocked,
            "Contour classified"
        );

        summaries.push(ContourSummary {
            area,
            point_count: contour.points.len(),
            bounding_box: bounding_box(&contour.points),
            blocked,
        });
    }

    (mask, summaries)
}
