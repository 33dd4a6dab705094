//! ColorPark 三個請求的 payload。
//!
//! 欄位名稱與服務端一致，`None` 會序列化成 JSON `null`。

use crate::config::replay_config::ReplayConfig;
use serde::Serialize;

pub const SERVICE_WORKS_SAVE: &str = "Works.save";
pub const SERVICE_ORDER_CREATE: &str = "Order.create";
pub const SERVICE_MACHINE_WAIT: &str = "Machine.wait";

/// 設計稿上的單一圖層（圖片擺放位置與尺寸）
#[derive(Debug, Clone, Serialize)]
pub struct WorksComponent {
    pub is_under: u8,
    pub is_discount: u8,
    pub id: Option<u64>,
    #[serde(rename = "type")]
    pub component_type: u8,
    pub material_id: u64,
    pub works_id: Option<u64>,
    pub original_id: u64,
    pub index: u32,
    pub font_family: String,
    pub font_style: String,
    pub font_size: u32,
    pub font_color: String,
    pub under_color: String,
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub left: f64,
    pub zoom: u32,
    pub rotate: i32,
    pub content: String,
    pub upper_left_x: f64,
    pub upper_left_y: f64,
    pub upper_right_x: f64,
    pub upper_right_y: f64,
    pub lower_left_x: f64,
    pub lower_left_y: f64,
    pub lower_right_x: f64,
    pub lower_right_y: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub image_left: f64,
    pub image_top: f64,
    pub image_width: f64,
    pub image_height: f64,
}

impl WorksComponent {
    /// 固定的圖片圖層
    pub fn fixed_image() -> Self {
        Self {
            is_under: 0,
            is_discount: 0,
            id: None,
            component_type: 0,
            material_id: 0,
            works_id: None,
            original_id: 0,
            index: 100,
            font_family: ".ttf".to_string(),
            font_style: "regular".to_string(),
            font_size: 0,
            font_color: String::new(),
            under_color: "#00000000".to_string(),
            width: 162.80127198402892,
            height: 150.52885572139306,
            top: 17.23557213930348,
            left: -31.400635992014465,
            zoom: 1,
            rotate: 0,
            content: "https://img.colorpark.cn/api/render/1754320363505.jpeg".to_string(),
            upper_left_x: -31.40063599199751,
            upper_left_y: 17.235572139291047,
            upper_right_x: 131.400635992,
            upper_right_y: 17.235572139291047,
            lower_left_x: -31.40063599199751,
            lower_left_y: 167.76442786071144,
            lower_right_x: 131.400635992,
            lower_right_y: 167.76442786071144,
            center_x: 50.0,
            center_y: 92.5,
            image_left: -31.400635992014465,
            image_top: 17.23557213930348,
            image_width: 162.80127198402892,
            image_height: 150.52885572139306,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorksSavePayload {
    #[serde(rename = "s")]
    pub service: &'static str,
    pub components: Vec<WorksComponent>,
    pub works_id: Option<String>,
    pub goods_id: String,
    pub template: Option<String>,
    pub template_price: Option<String>,
    pub template_user_id: Option<u64>,
    pub user_id: Option<u64>,
    pub platform: u8,
    pub shape_image: String,
    pub shape_id: String,
    pub shape_price: String,
    pub machine_id: String,
    pub terminal: u8,
    pub background_color: Option<String>,
}

impl WorksSavePayload {
    pub fn fixed(config: &ReplayConfig) -> Self {
        Self {
            service: SERVICE_WORKS_SAVE,
            components: vec![WorksComponent::fixed_image()],
            works_id: None,
            goods_id: config.goods_id.clone(),
            template: None,
            template_price: None,
            template_user_id: None,
            user_id: None,
            platform: 4,
            shape_image: String::new(),
            shape_id: String::new(),
            shape_price: String::new(),
            machine_id: config.machine_id.clone(),
            terminal: 2,
            background_color: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderCreatePayload {
    #[serde(rename = "s")]
    pub service: &'static str,
    #[serde(rename = "type")]
    pub order_type: u8,
    pub machine_id: String,
    pub goods_id: String,
    pub works_id: String,
    pub channel_no: Option<String>,
    pub dict_id: Option<String>,
    pub goods_size: Option<String>,
    pub works_num: Option<u32>,
    pub shop_id: Option<String>,
    pub sn: Option<String>,
    pub coupon_id: Option<String>,
    pub user_address: Option<String>,
    pub surface_type: u32,
    pub surface_id: u32,
    pub surface_color_series_id: u32,
    pub surface_color_id: u32,
    pub language: String,
    pub support_paypal: String,
    pub promoter_id: String,
    pub terminal: u8,
    pub customize_size_id: String,
    /// Unix 秒
    pub create_time: i64,
    pub user_id: u64,
}

impl OrderCreatePayload {
    pub fn for_works(config: &ReplayConfig, works_id: &str, create_time: i64) -> Self {
        Self {
            service: SERVICE_ORDER_CREATE,
            order_type: 2,
            machine_id: config.machine_id.clone(),
            goods_id: config.goods_id.clone(),
            works_id: works_id.to_string(),
            channel_no: None,
            dict_id: None,
            goods_size: None,
            works_num: None,
            shop_id: None,
            sn: None,
            coupon_id: None,
            user_address: None,
            surface_type: 0,
            surface_id: 0,
            surface_color_series_id: 0,
            surface_color_id: 0,
            language: config.language.clone(),
            support_paypal: String::new(),
            promoter_id: String::new(),
            terminal: 4,
            customize_size_id: String::new(),
            create_time,
            user_id: config.user_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MachineWaitPayload {
    #[serde(rename = "s")]
    pub service: &'static str,
    pub machine_id: String,
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
}

impl MachineWaitPayload {
    /// 只查詢第一頁，不做輪詢
    pub fn first_page(config: &ReplayConfig) -> Self {
        Self {
            service: SERVICE_MACHINE_WAIT,
            machine_id: config.machine_id.clone(),
            page: 1,
            per_page: 20,
            total: 0,
        }
    }
}
