use std::io::Cursor;

use anyhow::Context;
use image::{ImageOutputFormat, Rgb, RgbImage};

use crate::domain::progress::ProgressSummary;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 400;
const MARGIN: u32 = 40;
const PANEL_WIDTH: u32 = WIDTH / 2;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLUE: Rgb<u8> = Rgb([49, 99, 206]);
const LIGHT_BLUE: Rgb<u8> = Rgb([173, 216, 230]);
const RED: Rgb<u8> = Rgb([205, 60, 60]);
const GREEN: Rgb<u8> = Rgb([60, 160, 80]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    for x in x0..x1.min(img.width()) {
        for y in y0..y1.min(img.height()) {
            img.put_pixel(x, y, color);
        }
    }
}

fn dashed_hline(img: &mut RgbImage, x0: u32, x1: u32, y: u32, color: Rgb<u8>) {
    if y >= img.height() {
        return;
    }
    let mut x = x0;
    while x < x1.min(img.width()) {
        for dx in 0..6 {
            if x + dx < x1.min(img.width()) {
                img.put_pixel(x + dx, y, color);
            }
        }
        x += 12;
    }
}

/// Высота столбика в пикселях при верхней границе шкалы `scale_max`.
fn bar_px(value: f64, scale_max: f64) -> u32 {
    if scale_max <= 0.0 || value <= 0.0 {
        return 0;
    }
    let usable = (HEIGHT - 2 * MARGIN) as f64;
    ((value / scale_max) * usable).round() as u32
}

/// Два столбика, как на графике оригинального бота: слева вода
/// (выпито + остаток до цели), справа калории (съедено + сожжено,
/// пунктир — цель). Чистая функция состояния прогресса в PNG-байты.
pub fn render_progress_chart(summary: &ProgressSummary) -> anyhow::Result<Vec<u8>> {
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, WHITE);

    // шкала каждой панели с запасом 10%
    let water_max = summary.water_goal_ml.max(summary.water_logged_ml).max(1.0) * 1.1;
    let calorie_max = summary
        .calorie_goal_kcal
        .max(summary.calories_logged_kcal + summary.calories_burned_kcal)
        .max(1.0)
        * 1.1;

    let floor_y = HEIGHT - MARGIN;

    // панель воды
    let water_x0 = MARGIN + PANEL_WIDTH / 4;
    let water_x1 = water_x0 + PANEL_WIDTH / 3;
    let drunk_px = bar_px(summary.water_logged_ml, water_max);
    fill_rect(&mut img, water_x0, floor_y - drunk_px, water_x1, floor_y, BLUE);
    if summary.water_goal_ml > summary.water_logged_ml {
        let goal_px = bar_px(summary.water_goal_ml, water_max);
        fill_rect(
            &mut img,
            water_x0,
            floor_y - goal_px,
            water_x1,
            floor_y - drunk_px,
            LIGHT_BLUE,
        );
    }

    // панель калорий
    let cal_x0 = PANEL_WIDTH + MARGIN + PANEL_WIDTH / 4;
    let cal_x1 = cal_x0 + PANEL_WIDTH / 3;
    let eaten_px = bar_px(summary.calories_logged_kcal, calorie_max);
    fill_rect(&mut img, cal_x0, floor_y - eaten_px, cal_x1, floor_y, RED);
    let burned_px = bar_px(summary.calories_burned_kcal, calorie_max);
    fill_rect(
        &mut img,
        cal_x0,
        floor_y - eaten_px - burned_px,
        cal_x1,
        floor_y - eaten_px,
        GREEN,
    );
    let goal_y = floor_y - bar_px(summary.calorie_goal_kcal, calorie_max);
    dashed_hline(&mut img, PANEL_WIDTH + MARGIN, WIDTH - MARGIN, goal_y, BLACK);

    // рамка-ось снизу
    fill_rect(&mut img, MARGIN, floor_y, WIDTH - MARGIN, floor_y + 2, BLACK);

    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .context("encode progress chart to png")?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> ProgressSummary {
        ProgressSummary {
            water_logged_ml: 800.0,
            water_goal_ml: 2100.0,
            water_remaining_ml: 1300.0,
            calories_logged_kcal: 1200.0,
            calorie_goal_kcal: 1673.75,
            calories_burned_kcal: 300.0,
            calorie_balance_kcal: 773.75,
        }
    }

    #[test]
    fn renders_a_png() {
        let bytes = render_progress_chart(&summary()).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn handles_zero_state_without_panicking() {
        let s = ProgressSummary {
            water_logged_ml: 0.0,
            water_goal_ml: 0.0,
            water_remaining_ml: 0.0,
            calories_logged_kcal: 0.0,
            calorie_goal_kcal: 0.0,
            calories_burned_kcal: 0.0,
            calorie_balance_kcal: 0.0,
        };
        assert!(render_progress_chart(&s).is_ok());
    }

    #[test]
    fn handles_overshoot_above_goal() {
        let mut s = summary();
        s.water_logged_ml = 9000.0;
        s.calories_logged_kcal = 5000.0;
        assert!(render_progress_chart(&s).is_ok());
    }
}
