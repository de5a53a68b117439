use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::Env;

use crate::constants::{HALF_RAY, HALF_WAD, RAY, WAD, WAD_RAY_RATIO};

use super::mul_div;

/// Arithmetic for 27 decimal fixed-point numbers
pub trait RayMath {
    /// Multiply two rays, rounding half up
    fn ray_mul(self, e: &Env, y: i128) -> i128;

    /// Divide two rays, rounding down
    fn ray_div(self, e: &Env, y: i128) -> i128;

    /// Divide two rays, rounding up
    fn ray_div_up(self, e: &Env, y: i128) -> i128;

    /// Convert a wad to a ray
    fn wad_to_ray(self, e: &Env) -> i128;

    /// Convert a ray to a wad, rounding half up
    fn ray_to_wad(self) -> i128;
}

impl RayMath for i128 {
    fn ray_mul(self, e: &Env, y: i128) -> i128 {
        mul_div(e, self, y, HALF_RAY, RAY)
    }

    fn ray_div(self, e: &Env, y: i128) -> i128 {
        self.fixed_div_floor(e, &y, &RAY)
    }

    fn ray_div_up(self, e: &Env, y: i128) -> i128 {
        self.fixed_div_ceil(e, &y, &RAY)
    }

    fn wad_to_ray(self, e: &Env) -> i128 {
        self.fixed_mul_floor(e, &WAD_RAY_RATIO, &1)
    }

    fn ray_to_wad(self) -> i128 {
        (self + WAD_RAY_RATIO / 2) / WAD_RAY_RATIO
    }
}

/// Arithmetic for 18 decimal fixed-point numbers
pub trait WadMath {
    /// Multiply two wads, rounding half up
    fn wad_mul(self, e: &Env, y: i128) -> i128;

    /// Divide two wads, rounding half up
    fn wad_div(self, e: &Env, y: i128) -> i128;
}

impl WadMath for i128 {
    fn wad_mul(self, e: &Env, y: i128) -> i128 {
        mul_div(e, self, y, HALF_WAD, WAD)
    }

    fn wad_div(self, e: &Env, y: i128) -> i128 {
        mul_div(e, self, WAD, y / 2, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_mul() {
        let e = Env::default();
        assert_eq!((2 * RAY).ray_mul(&e, 3 * RAY), 6 * RAY);
        assert_eq!(RAY.ray_mul(&e, 1_0000000), 1_0000000);
        // 1.5 * 1e-27 rounds half up to 2e-27
        assert_eq!(3i128.ray_mul(&e, HALF_RAY), 2);
        assert_eq!(1i128.ray_mul(&e, HALF_RAY - 1), 0);
    }

    #[test]
    fn test_ray_div() {
        let e = Env::default();
        assert_eq!((6 * RAY).ray_div(&e, 3 * RAY), 2 * RAY);
        assert_eq!((6 * RAY).ray_div_up(&e, 3 * RAY), 2 * RAY);
        // 2 / 3 rounds down
        assert_eq!(2i128.ray_div(&e, 3 * RAY), 0);
        assert_eq!(2i128.ray_div_up(&e, 3 * RAY), 1);
        assert_eq!(100_0000000i128.ray_div(&e, RAY + RAY / 10), 90_9090909);
        assert_eq!(100_0000000i128.ray_div_up(&e, RAY + RAY / 10), 90_9090910);
    }

    #[test]
    fn test_ray_div_large_values() {
        let e = Env::default();
        // 1e20 * 1e27 overflows an i128 before dividing
        let amount: i128 = 100_000_000_000_000_000_000;
        assert_eq!(amount.ray_div(&e, 2 * RAY), amount / 2);
        assert_eq!(amount.ray_div_up(&e, 3 * RAY), amount / 3 + 1);
        assert_eq!(amount.wad_to_ray(&e), amount * WAD_RAY_RATIO);
    }

    #[test]
    fn test_wad_ray_conversion() {
        let e = Env::default();
        assert_eq!(WAD.wad_to_ray(&e), RAY);
        assert_eq!(RAY.ray_to_wad(), WAD);
        assert_eq!(1_499_999_999i128.ray_to_wad(), 1);
        assert_eq!(1_500_000_000i128.ray_to_wad(), 2);
    }

    #[test]
    fn test_wad_math() {
        let e = Env::default();
        assert_eq!((2 * WAD).wad_mul(&e, WAD / 4), WAD / 2);
        assert_eq!(WAD.wad_div(&e, 3 * WAD), 333_333_333_333_333_333);
        assert_eq!((2 * WAD).wad_div(&e, 3 * WAD), 666_666_666_666_666_667);
    }
}
