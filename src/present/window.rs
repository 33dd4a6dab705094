use crate::domain::model::FlatAreaRenders;
use crate::domain::ports::Presenter;
use crate::utils::error::{KitError, Result};
use eframe::egui;
use image::{GrayImage, RgbImage};

pub const PANEL_TITLES: [&str; 4] = [
    "Original",
    "Edges",
    "Flat Area Mask",
    "Final Result (Safe to Print)",
];

const PANEL_WIDTH: f32 = 250.0;

fn rgb_to_color_image(image: &RgbImage) -> egui::ColorImage {
    let (w, h) = image.dimensions();
    egui::ColorImage::from_rgb([w as usize, h as usize], image.as_raw())
}

fn gray_to_color_image(image: &GrayImage) -> egui::ColorImage {
    let (w, h) = image.dimensions();
    egui::ColorImage::from_gray([w as usize, h as usize], image.as_raw())
}

struct InspectionApp {
    panels: Vec<(&'static str, egui::TextureHandle)>,
}

impl InspectionApp {
    fn new(ctx: &egui::Context, images: Vec<(&'static str, egui::ColorImage)>) -> Self {
        let panels = images
            .into_iter()
            .map(|(title, image)| (title, ctx.load_texture(title, image, egui::TextureOptions::LINEAR)))
            .collect();
        Self { panels }
    }
}

impl eframe::App for InspectionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 任意鍵關閉
        let key_pressed = ctx.input(|i| {
            i.events
                .iter()
                .any(|event| matches!(event, egui::Event::Key { pressed: true, .. }))
        });
        if key_pressed {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label("Press any key to close");
        });

        for (index, (title, texture)) in self.panels.iter().enumerate() {
            let [w, h] = texture.size();
            let scale = PANEL_WIDTH / w.max(1) as f32;

            egui::Window::new(*title)
                .default_pos([10.0 + index as f32 * (PANEL_WIDTH + 20.0), 30.0])
                .resizable(false)
                .show(ctx, |ui| {
                    ui.add(
                        egui::Image::new(texture)
                            .fit_to_exact_size(egui::vec2(PANEL_WIDTH, h as f32 * scale)),
                    );
                });
        }
    }
}

/// 開啟原生視窗顯示四張影像，按任意鍵結束
#[derive(Debug, Clone)]
pub struct WindowPresenter {
    title: String,
}

impl WindowPresenter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Default for WindowPresenter {
    fn default() -> Self {
        Self::new("Flat Area Detector")
    }
}

impl Presenter for WindowPresenter {
    fn present(&self, renders: &FlatAreaRenders) -> Result<()> {
        let images = vec![
            (PANEL_TITLES[0], rgb_to_color_image(&renders.original)),
            (PANEL_TITLES[1], gray_to_color_image(&renders.edges)),
            (PANEL_TITLES[2], gray_to_color_image(&renders.mask)),
            (PANEL_TITLES[3], rgb_to_color_image(&renders.result)),
        ];

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([4.0 * (PANEL_WIDTH + 20.0) + 20.0, 640.0]),
            ..Default::default()
        };

        tracing::info!("🖼️ Opening inspection window (press any key to close)");
        eframe::run_native(
            &self.title,
            options,
            Box::new(move |cc| Ok(Box::new(InspectionApp::new(&cc.egui_ctx, images)))),
        )
        .map_err(|e| KitError::DisplayError {
            message: e.to_string(),
        })
    }
}
