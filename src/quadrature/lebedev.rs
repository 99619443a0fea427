//! Lebedev quadrature rules on the unit sphere
//!
//! Each rule is a set of points invariant under the octahedral group with
//! weights chosen so that spherical harmonics up to the rule's algebraic
//! order integrate exactly. Weights are normalized to sum to 1.
//!
//! Rule `n` has algebraic order `2n + 1`.
//!
//! Reference: V. Lebedev, D. Laikov, "A quadrature formula for the sphere of
//! the 131st algebraic order of accuracy", Doklady Mathematics 59(3), 1999.

use super::{QuadratureError, QuadratureGrid, QuadratureProvider};
use glam::Vec3;

/// Point count per rule index (0 = unused)
const POINT_COUNTS: [usize; 16] = [
    0, 6, 14, 26, 38, 50, 74, 86, 110, 146, 170, 194, 230, 266, 302, 350,
];

/// Octahedral orbit generator code
#[derive(Debug, Clone, Copy)]
enum Orbit {
    /// 6 points: (±1, 0, 0) and permutations
    Vertices,
    /// 12 points: (0, ±a, ±a), a = 1/√2
    EdgeMidpoints,
    /// 8 points: (±a, ±a, ±a), a = 1/√3
    FaceCenters,
    /// 24 points: (±a, ±a, ±b), b = √(1 - 2a²), and permutations
    Diagonal(f64),
    /// 24 points: (±a, ±b, 0), b = √(1 - a²), and permutations
    Planar(f64),
    /// 48 points: (±a, ±b, ±c), c = √(1 - a² - b²), and permutations
    General(f64, f64),
}

/// One orbit with its shared weight
type OrbitEntry = (Orbit, f64);

const RULE_1: &[OrbitEntry] = &[(Orbit::Vertices, 0.166_666_666_666_666_7)];

const RULE_2: &[OrbitEntry] = &[
    (Orbit::Vertices, 0.666_666_666_666_666_7e-1),
    (Orbit::FaceCenters, 0.750_000_000_000_000_0e-1),
];

const RULE_3: &[OrbitEntry] = &[
    (Orbit::Vertices, 0.476_190_476_190_476_2e-1),
    (Orbit::EdgeMidpoints, 0.380_952_380_952_381_0e-1),
    (Orbit::FaceCenters, 0.321_428_571_428_571_4e-1),
];

const RULE_4: &[OrbitEntry] = &[
    (Orbit::Vertices, 0.952_380_952_380_952_4e-2),
    (Orbit::FaceCenters, 0.321_428_571_428_571_4e-1),
    (Orbit::Planar(0.459_700_843_380_983_1), 0.285_714_285_714_285_7e-1),
];

const RULE_5: &[OrbitEntry] = &[
    (Orbit::Vertices, 0.126_984_126_984_127_0e-1),
    (Orbit::EdgeMidpoints, 0.225_749_559_082_892_4e-1),
    (Orbit::FaceCenters, 0.210_937_500_000_000_0e-1),
    (Orbit::Diagonal(0.301_511_344_577_763_6), 0.201_733_355_379_188_7e-1),
];

const RULE_6: &[OrbitEntry] = &[
    (Orbit::Vertices, 0.513_067_179_733_846_4e-3),
    (Orbit::EdgeMidpoints, 0.166_040_695_657_420_4e-1),
    (Orbit::FaceCenters, -0.295_860_389_610_389_6e-1),
    (Orbit::Diagonal(0.480_384_461_415_261_4), 0.265_762_070_821_594_6e-1),
    (Orbit::Planar(0.320_772_648_980_776_4), 0.165_221_709_937_157_1e-1),
];

const RULE_7: &[OrbitEntry] = &[
    (Orbit::Vertices, 0.115_440_115_440_115_4e-1),
    (Orbit::FaceCenters, 0.119_439_090_858_562_8e-1),
    (Orbit::Diagonal(0.369_602_846_454_150_2), 0.111_105_557_106_034_0e-1),
    (Orbit::Diagonal(0.694_354_006_602_666_4), 0.118_765_012_945_371_4e-1),
    (Orbit::Planar(0.374_243_039_090_341_2), 0.118_123_037_469_044_8e-1),
];

const RULE_8: &[OrbitEntry] = &[
    (Orbit::Vertices, 0.382_827_049_493_716_2e-2),
    (Orbit::FaceCenters, 0.979_373_751_248_751_2e-2),
    (Orbit::Diagonal(0.185_115_635_344_736_2), 0.821_173_728_319_111_1e-2),
    (Orbit::Diagonal(0.690_421_048_382_292_2), 0.994_281_489_117_810_3e-2),
    (Orbit::Diagonal(0.395_689_473_055_941_9), 0.959_547_133_607_096_3e-2),
    (Orbit::Planar(0.478_369_028_812_150_2), 0.969_499_636_166_302_8e-2),
];

const RULE_9: &[OrbitEntry] = &[
    (Orbit::Vertices, 0.599_631_368_862_148_8e-3),
    (Orbit::EdgeMidpoints, 0.737_299_971_862_075_1e-2),
    (Orbit::FaceCenters, 0.721_051_536_014_449_6e-2),
    (Orbit::Diagonal(0.676_441_040_011_426_4), 0.711_635_549_311_755_8e-2),
    (Orbit::Diagonal(0.417_496_122_796_545_3), 0.675_382_948_631_447_8e-2),
    (Orbit::Diagonal(0.157_467_667_203_908_2), 0.757_439_415_905_403_0e-2),
    (
        Orbit::General(0.140_355_381_171_318_3, 0.449_332_832_326_955_7),
        0.699_108_735_330_326_1e-2,
    ),
];

const RULE_10: &[OrbitEntry] = &[
    (Orbit::Vertices, 0.554_484_290_203_736_2e-2),
    (Orbit::EdgeMidpoints, 0.607_133_277_067_074_7e-2),
    (Orbit::FaceCenters, 0.638_367_477_351_510_0e-2),
    (Orbit::Diagonal(0.255_125_262_111_413_4), 0.518_338_758_774_779_0e-2),
    (Orbit::Diagonal(0.674_360_146_036_276_6), 0.631_792_900_981_372_6e-2),
    (Orbit::Diagonal(0.431_891_069_671_941_0), 0.620_167_000_658_907_8e-2),
    (Orbit::Planar(0.261_393_136_033_598_8), 0.547_714_338_513_734_6e-2),
    (
        Orbit::General(0.499_045_316_179_603_7, 0.144_663_074_432_511_5),
        0.596_838_398_768_115_6e-2,
    ),
];

const RULE_11: &[OrbitEntry] = &[
    (Orbit::Vertices, 0.178_234_044_724_460_6e-2),
    (Orbit::EdgeMidpoints, 0.571_690_594_997_710_7e-2),
    (Orbit::FaceCenters, 0.557_338_317_884_873_8e-2),
    (Orbit::Diagonal(0.671_297_344_269_522_6), 0.560_870_408_258_799_9e-2),
    (Orbit::Diagonal(0.289_246_562_757_543_9), 0.515_823_771_180_538_0e-2),
    (Orbit::Diagonal(0.444_693_317_871_743_7), 0.551_877_146_727_360_9e-2),
    (Orbit::Diagonal(0.129_933_544_765_006_7), 0.410_677_702_816_939_8e-2),
    (Orbit::Planar(0.345_770_219_761_128_3), 0.505_184_606_461_480_8e-2),
    (
        Orbit::General(0.159_041_710_538_353_0, 0.836_036_015_482_458_9),
        0.553_024_891_623_309_4e-2,
    ),
];

const RULE_12: &[OrbitEntry] = &[
    (Orbit::Vertices, -0.552_263_991_972_733_1e-1),
    (Orbit::FaceCenters, 0.445_027_460_744_521_9e-2),
    (Orbit::Diagonal(0.449_204_468_739_761_1), 0.449_684_106_792_139_9e-2),
    (Orbit::Diagonal(0.252_041_949_021_020_1), 0.504_915_345_047_874_8e-2),
    (Orbit::Diagonal(0.698_190_665_844_724_2), 0.397_640_801_805_187_4e-2),
    (Orbit::Diagonal(0.658_740_524_346_096_0), 0.440_140_065_038_102_7e-2),
    (Orbit::Diagonal(0.403_854_405_009_766_0e-1), 0.172_454_435_054_440_3e-1),
    (Orbit::Planar(0.582_384_230_971_558_5), 0.423_108_309_535_734_0e-2),
    (Orbit::Planar(0.354_587_739_051_868_8), 0.519_806_986_406_439_9e-2),
    (
        Orbit::General(0.227_218_180_899_818_7, 0.486_466_153_588_664_7),
        0.469_572_097_256_888_6e-2,
    ),
];

const RULE_13: &[OrbitEntry] = &[
    (Orbit::Vertices, -0.131_376_912_732_693_3e-2),
    (Orbit::EdgeMidpoints, -0.252_272_870_485_925_2e-2),
    (Orbit::FaceCenters, 0.418_685_388_170_058_4e-2),
    (Orbit::Diagonal(0.703_937_339_158_547_5), 0.531_516_797_781_084_6e-2),
    (Orbit::Diagonal(0.101_252_624_857_241_4), 0.404_714_237_708_621_2e-2),
    (Orbit::Diagonal(0.464_744_872_642_053_9), 0.411_248_239_440_699_0e-2),
    (Orbit::Diagonal(0.327_742_065_497_162_9), 0.359_558_489_975_878_1e-2),
    (Orbit::Diagonal(0.662_033_866_369_997_4), 0.425_613_135_142_815_4e-2),
    (Orbit::Planar(0.850_650_808_352_039_9), 0.422_958_270_064_724_2e-2),
    (
        Orbit::General(0.323_348_454_269_289_9, 0.115_311_201_100_970_1),
        0.408_091_422_578_050_5e-2,
    ),
    (
        Orbit::General(0.231_479_015_871_260_1, 0.524_493_924_092_236_5),
        0.407_146_759_383_096_5e-2,
    ),
];

const RULE_14: &[OrbitEntry] = &[
    (Orbit::Vertices, 0.854_591_172_512_815_6e-3),
    (Orbit::FaceCenters, 0.359_911_928_502_557_0e-2),
    (Orbit::Diagonal(0.351_564_034_557_010_5), 0.344_978_842_430_588_4e-2),
    (Orbit::Diagonal(0.656_632_941_021_961_2), 0.360_482_260_141_988_5e-2),
    (Orbit::Diagonal(0.472_905_413_258_100_5), 0.357_672_966_174_336_6e-2),
    (Orbit::Diagonal(0.961_830_852_261_478_4e-1), 0.235_210_141_368_916_5e-2),
    (Orbit::Diagonal(0.221_964_523_629_417_8), 0.310_895_312_241_367_6e-2),
    (Orbit::Diagonal(0.701_176_641_608_954_5), 0.365_004_580_767_725_3e-2),
    (Orbit::Planar(0.264_415_288_706_066_3), 0.298_234_496_317_180_2e-2),
    (Orbit::Planar(0.571_895_589_187_896_1), 0.360_082_093_221_645_8e-2),
    (
        Orbit::General(0.251_003_475_177_046_5, 0.800_072_749_407_395_2),
        0.357_154_055_427_338_9e-2,
    ),
    (
        Orbit::General(0.123_354_853_258_332_7, 0.412_772_408_316_853_1),
        0.339_231_220_500_617_0e-2,
    ),
];

const RULE_15: &[OrbitEntry] = &[
    (Orbit::Vertices, 0.300_679_674_945_393_6e-2),
    (Orbit::FaceCenters, 0.305_062_774_565_076_4e-2),
    (Orbit::Diagonal(0.706_896_546_391_231_6), 0.162_110_460_028_900_4e-2),
    (Orbit::Diagonal(0.479_468_262_571_202_5), 0.300_570_148_490_174_6e-2),
    (Orbit::Diagonal(0.192_753_315_487_801_9), 0.299_099_252_965_377_8e-2),
    (Orbit::Diagonal(0.693_035_796_132_712_3), 0.298_217_064_410_757_6e-2),
    (Orbit::Diagonal(0.360_830_211_552_009_1), 0.272_156_423_731_098_9e-2),
    (Orbit::Diagonal(0.649_848_616_149_616_9), 0.303_351_379_581_115_2e-2),
    (Orbit::Planar(0.193_294_501_323_033_9), 0.300_794_955_521_853_1e-2),
    (Orbit::Planar(0.380_049_491_989_930_3), 0.288_196_460_305_530_9e-2),
    (
        Orbit::General(0.289_955_882_549_957_4, 0.793_453_785_658_231_6),
        0.295_835_762_653_570_2e-2,
    ),
    (
        Orbit::General(0.968_412_145_510_395_7e-1, 0.828_080_150_668_686_2),
        0.303_602_002_640_708_4e-2,
    ),
    (
        Orbit::General(0.183_343_464_704_165_9, 0.907_465_826_530_512_7),
        0.283_218_740_392_630_3e-2,
    ),
];

const RULES: [&[OrbitEntry]; 16] = [
    &[], RULE_1, RULE_2, RULE_3, RULE_4, RULE_5, RULE_6, RULE_7, RULE_8, RULE_9, RULE_10,
    RULE_11, RULE_12, RULE_13, RULE_14, RULE_15,
];

/// Lebedev quadrature provider
///
/// Stateless; every call regenerates the requested rule from its orbit table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lebedev;

impl Lebedev {
    /// Highest tabulated rule index
    pub const MAX_RULE: u32 = 15;

    /// True if `rule` resolves to a point set
    #[inline]
    pub fn is_available(rule: u32) -> bool {
        (1..=Self::MAX_RULE).contains(&rule)
    }

    /// Algebraic order of accuracy of `rule`
    #[inline]
    pub fn order(rule: u32) -> u32 {
        2 * rule + 1
    }

    /// Number of points of `rule` (None if unavailable)
    pub fn point_count(rule: u32) -> Option<usize> {
        Self::is_available(rule).then(|| POINT_COUNTS[rule as usize])
    }
}

impl QuadratureProvider for Lebedev {
    fn grid(&self, rule: u32) -> Result<QuadratureGrid, QuadratureError> {
        if !Self::is_available(rule) {
            return Err(QuadratureError::RuleUnavailable(rule));
        }

        let capacity = POINT_COUNTS[rule as usize];
        let mut points = Vec::with_capacity(capacity);
        let mut weights = Vec::with_capacity(capacity);

        for &(orbit, weight) in RULES[rule as usize] {
            for p in orbit_points(orbit) {
                points.push(Vec3::new(p[0] as f32, p[1] as f32, p[2] as f32));
                weights.push(weight as f32);
            }
        }

        debug_assert_eq!(points.len(), capacity);
        Ok(QuadratureGrid::new(points, weights))
    }
}

/// Expand an orbit into its points (f64 until the very end)
fn orbit_points(orbit: Orbit) -> Vec<[f64; 3]> {
    let mut out = Vec::with_capacity(48);
    match orbit {
        Orbit::Vertices => {
            for axis in 0..3 {
                for s in [1.0, -1.0] {
                    let mut p = [0.0; 3];
                    p[axis] = s;
                    out.push(p);
                }
            }
        }
        Orbit::EdgeMidpoints => {
            let a = 0.5f64.sqrt();
            // zero in one axis, ±a in the other two
            for (i, j) in [(1, 2), (0, 2), (0, 1)] {
                for (s1, s2) in sign_pairs() {
                    let mut p = [0.0; 3];
                    p[i] = a * s1;
                    p[j] = a * s2;
                    out.push(p);
                }
            }
        }
        Orbit::FaceCenters => {
            let a = (1.0f64 / 3.0).sqrt();
            for sx in [1.0, -1.0] {
                for sy in [1.0, -1.0] {
                    for sz in [1.0, -1.0] {
                        out.push([a * sx, a * sy, a * sz]);
                    }
                }
            }
        }
        Orbit::Diagonal(a) => {
            let b = (1.0 - 2.0 * a * a).sqrt();
            // the distinct coordinate `b` sits in each axis in turn
            for b_axis in [2, 1, 0] {
                for sx in [1.0, -1.0] {
                    for sy in [1.0, -1.0] {
                        for sz in [1.0, -1.0] {
                            let mut p = [a * sx, a * sy, a * sz];
                            p[b_axis] = b * [sx, sy, sz][b_axis];
                            out.push(p);
                        }
                    }
                }
            }
        }
        Orbit::Planar(a) => {
            let b = (1.0 - a * a).sqrt();
            // (u, v) pairs placed in the XY, XZ and YZ planes
            for (i, j) in [(0, 1), (0, 2), (1, 2)] {
                for (u, v) in [(a, b), (b, a)] {
                    for (s1, s2) in sign_pairs() {
                        let mut p = [0.0; 3];
                        p[i] = u * s1;
                        p[j] = v * s2;
                        out.push(p);
                    }
                }
            }
        }
        Orbit::General(a, b) => {
            let c = (1.0 - a * a - b * b).sqrt();
            for [i, j, k] in [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]] {
                for sx in [1.0, -1.0] {
                    for sy in [1.0, -1.0] {
                        for sz in [1.0, -1.0] {
                            let mut p = [0.0; 3];
                            p[i] = a * sx;
                            p[j] = b * sy;
                            p[k] = c * sz;
                            out.push(p);
                        }
                    }
                }
            }
        }
    }
    out
}

#[inline]
fn sign_pairs() -> [(f64, f64); 4] {
    [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)]
}
