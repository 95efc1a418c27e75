// 36 vertices: an 18 point outline extruded from z=144 to z=154

pub const VERTEX_COUNT: usize = 36;

/// xyz triples
#[rustfmt::skip]
pub static VERTEX_POSITIONS: [i16; VERTEX_COUNT * 3] = [
    -26, -42, 144,
    16, -42, 144,
    26, -42, 144,
    62, -42, 144,
    -14, -34, 144,
    4, -34, 144,
    34, -34, 144,
    10, -11, 144,
    -6, 4, 144,
    15, 7, 144,
    -2, 23, 144,
    -27, 48, 144,
    4, 46, 144,
    22, 46, 144,
    -52, 51, 144,
    -21, 51, 144,
    -3, 51, 144,
    31, 51, 144,
    -26, -42, 154,
    16, -42, 154,
    26, -42, 154,
    62, -42, 154,
    -14, -34, 154,
    4, -34, 154,
    34, -34, 154,
    10, -11, 154,
    -6, 4, 154,
    15, 7, 154,
    -2, 23, 154,
    -27, 48, 154,
    4, 46, 154,
    22, 46, 154,
    -52, 51, 154,
    -21, 51, 154,
    -3, 51, 154,
    31, 51, 154,];

/// triangles covering the front face, the back face and the sides
#[rustfmt::skip]
pub static SOLID_INDICES: [u8; 204] = [
    0, 4, 5,
    5, 1, 0,
    8, 5, 4,
    8, 7, 5,
    2, 6, 3,
    7, 3, 6,
    7, 9, 3,
    8, 9, 7,
    8, 10, 9,
    14, 15, 11,
    14, 11, 10,
    14, 10, 8,
    16, 17, 13,
    16, 13, 12,
    12, 13, 9,
    9, 10, 12,
    19, 22, 18,
    23, 22, 19,
    23, 26, 22,
    25, 26, 23,
    21, 24, 20,
    21, 27, 24,
    27, 25, 24,
    27, 26, 25,
    28, 26, 27,
    26, 28, 29,
    29, 32, 26,
    29, 33, 32,
    31, 34, 35,
    34, 31, 30,
    30, 31, 27,
    30, 27, 28,
    17, 35, 31,
    31, 13, 17,
    13, 31, 27,
    27, 9, 13,
    9, 27, 21,
    21, 3, 9,
    3, 21, 20,
    20, 2, 3,
    2, 20, 24,
    24, 6, 2,
    6, 24, 25,
    25, 7, 6,
    7, 25, 23,
    23, 5, 7,
    5, 23, 19,
    19, 1, 5,
    1, 19, 18,
    18, 0, 1,
    18, 0, 4,
    4, 22, 18,
    8, 26, 22,
    22, 4, 8,
    14, 32, 26,
    26, 8, 14,
    14, 15, 33,
    33, 32, 14,
    15, 33, 29,
    29, 11, 15,
    11, 29, 28,
    28, 10, 11,
    16, 34, 30,
    30, 12, 16,
    12, 30, 28,
    28, 10, 12,
    16, 17, 35,
    35, 34, 16,];

/// line segments: outline of both faces, then the edges joining them
#[rustfmt::skip]
pub static WIRE_INDICES: [u8; 108] = [
    0, 1,
    2, 3,
    0, 4,
    1, 5,
    2, 6,
    4, 8,
    5, 7,
    6, 7,
    3, 9,
    8, 14,
    9, 13,
    10, 11,
    10, 12,
    11, 15,
    12, 16,
    13, 17,
    14, 15,
    16, 17,
    18, 19,
    20, 21,
    18, 22,
    19, 23,
    20, 24,
    22, 26,
    23, 25,
    24, 25,
    21, 27,
    26, 32,
    27, 31,
    28, 29,
    28, 30,
    29, 33,
    30, 34,
    31, 35,
    32, 33,
    34, 35,
    0, 18,
    1, 19,
    2, 20,
    3, 21,
    4, 22,
    5, 23,
    6, 24,
    7, 25,
    8, 26,
    9, 27,
    10, 28,
    11, 29,
    12, 30,
    13, 31,
    14, 32,
    15, 33,
    16, 34,
    17, 35,
];
