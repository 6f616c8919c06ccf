//! 地理引擎 - 大圆距离计算与半径过滤
//!
//! 纯函数，无副作用，确定性：
//! `distance_km(a, b) == distance_km(b, a)` (浮点 epsilon 内)，
//! `distance_km(a, a) == 0`。

use crate::core::{AppError, AppResult};

/// 地球半径 (km)，haversine 公式使用
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// 经纬度坐标
///
/// 通过 [`Coordinate::new`] 构造时校验范围；
/// 目录中已校验过的记录可直接用字面量构造。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// 构造并校验坐标范围
    ///
    /// 纬度 ∈ [-90, 90]，经度 ∈ [-180, 180]，非有限值拒绝
    pub fn new(latitude: f64, longitude: f64) -> AppResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(AppError::validation(format!(
                "latitude must be in [-90, 90], got {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::validation(format!(
                "longitude must be in [-180, 180], got {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// haversine 大圆距离 (km)
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// 半径过滤谓词: `distance_km(center, point) <= radius_km`
pub fn within_radius(center: Coordinate, point: Coordinate, radius_km: f64) -> bool {
    distance_km(center, point) <= radius_km
}
