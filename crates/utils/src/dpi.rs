pub type Pixel = u32;
pub type Inch = f32;
pub type Dpi = f32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<P> {
    pub x: P,
    pub y: P,
}

impl<P> Point<P> {
    pub fn new(x: P, y: P) -> Self {
        Point { x, y }
    }

    pub fn into_tuple(self) -> (P, P) {
        (self.x, self.y)
    }
}

impl From<(f32, f32)> for Point<f32> {
    fn from((x, y): (f32, f32)) -> Self {
        Point { x, y }
    }
}

impl From<(u32, u32)> for Point<u32> {
    fn from((x, y): (u32, u32)) -> Self {
        Point { x, y }
    }
}

pub fn pixel_from_inches(inches: &Inch, dpi: &Dpi) -> Pixel {
    (inches * dpi) as Pixel
}

pub fn inches_from_pixel(pixel: &Pixel, dpi: &Dpi) -> Inch {
    (*pixel as Inch) / dpi
}

pub fn pixels_point_from_inch_point(point: &Point<Inch>, dpi: &Dpi) -> Point<Pixel> {
    (
        pixel_from_inches(&point.x, dpi),
        pixel_from_inches(&point.y, dpi),
    )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inch_pixel_round_trip() {
        let dpi = 300.0;
        assert_eq!(pixel_from_inches(&2.0, &dpi), 600);
        assert_eq!(inches_from_pixel(&600, &dpi), 2.0);
    }

    #[test]
    fn point_conversion() {
        let size = Point::new(2.0f32, 1.5);
        assert_eq!(
            pixels_point_from_inch_point(&size, &100.0).into_tuple(),
            (200, 150)
        );
    }
}
