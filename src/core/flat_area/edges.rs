use image::GrayImage;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

const EDGE: u8 = 255;

/// tan(22.5°) * 2^15
const TG22: i64 = 13573;

/// Canny 邊緣偵測：3x3 Sobel、L1 梯度強度 (|gx| + |gy|)、非極大值抑制、雙門檻滯後
///
/// 輸入必須已經模糊過，這裡不再做平滑。
/// 強度 > `high` 的像素為強邊緣，> `low` 且與強邊緣 8 連通的像素保留。
pub fn canny_l1(image: &GrayImage, low: f32, high: f32) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut edges = GrayImage::new(width, height);
    if width < 3 || height < 3 {
        return edges;
    }

    let gx = horizontal_sobel(image);
    let gy = vertical_sobel(image);
    let (gx, gy) = (gx.as_raw(), gy.as_raw());
    let magnitude: Vec<i32> = gx
        .iter()
        .zip(gy)
        .map(|(&x, &y)| i32::from(x).abs() + i32::from(y).abs())
        .collect();

    let w = width as usize;
    let h = height as usize;
    let mut candidate = vec![false; w * h];
    let mut stack = Vec::new();

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let i = y * w + x;
            let m = magnitude[i] as f32;
            if m <= low || !is_local_maximum(&magnitude, w, i, gx[i], gy[i]) {
                continue;
            }
            candidate[i] = true;
            if m > high {
                stack.push(i);
            }
        }
    }

    let out: &mut [u8] = &mut edges;
    for &i in &stack {
        out[i] = EDGE;
    }
    while let Some(i) = stack.pop() {
        for j in [i - w - 1, i - w, i - w + 1, i - 1, i + 1, i + w - 1, i + w, i + w + 1] {
            if candidate[j] && out[j] != EDGE {
                out[j] = EDGE;
                stack.push(j);
            }
        }
    }

    edges
}

/// 沿梯度方向（量化為 0°、45°、90°、135°）比較前後兩個鄰居
fn is_local_maximum(magnitude: &[i32], w: usize, i: usize, dx: i16, dy: i16) -> bool {
    let m = magnitude[i];
    let ax = i64::from(dx.unsigned_abs());
    let ay = i64::from(dy.unsigned_abs()) << 15;
    let tg22x = ax * TG22;

    if ay < tg22x {
        return m > magnitude[i - 1] && m >= magnitude[i + 1];
    }

    let tg67x = tg22x + (ax << 16);
    if ay > tg67x {
        return m > magnitude[i - w] && m >= magnitude[i + w];
    }

    // 同號時梯度指向右下，比較左上與右下；異號時比較右上與左下
    if (dx < 0) == (dy < 0) {
        m > magnitude[i - w - 1] && m > magnitude[i + w + 1]
    } else {
        m > magnitude[i - w + 1] && m > magnitude[i + w - 1]
    }
}
