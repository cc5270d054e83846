pub const PARTICLE_COUNT: usize = 50;
pub const LINK_DISTANCE: f64 = 100.0;
pub const PARTICLE_RGB: (u8, u8, u8) = (100, 255, 218);
const LINK_MAX_ALPHA: f64 = 50.0 / 255.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub opacity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub alpha: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
}

fn between(random: &mut impl FnMut() -> f64, low: f64, high: f64) -> f64 {
    low + random() * (high - low)
}

impl ParticleField {
    /// `random` yields uniform samples in `[0, 1)`.
    pub fn new(width: f64, height: f64, count: usize, mut random: impl FnMut() -> f64) -> Self {
        let particles = (0..count)
            .map(|_| Particle {
                x: between(&mut random, 0.0, width),
                y: between(&mut random, 0.0, height),
                vx: between(&mut random, -0.5, 0.5),
                vy: between(&mut random, -0.5, 0.5),
                size: between(&mut random, 2.0, 6.0),
                opacity: between(&mut random, 0.3, 0.8),
            })
            .collect();

        Self {
            width,
            height,
            particles,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.x += particle.vx;
            particle.y += particle.vy;

            if particle.x < 0.0 {
                particle.x = self.width;
            } else if particle.x > self.width {
                particle.x = 0.0;
            }
            if particle.y < 0.0 {
                particle.y = self.height;
            } else if particle.y > self.height {
                particle.y = 0.0;
            }
        }
    }

    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();

        for (index, a) in self.particles.iter().enumerate() {
            for b in &self.particles[index + 1..] {
                let distance = (a.x - b.x).hypot(a.y - b.y);
                if distance < LINK_DISTANCE {
                    links.push(Link {
                        from: (a.x, a.y),
                        to: (b.x, b.y),
                        alpha: (1.0 - distance / LINK_DISTANCE) * LINK_MAX_ALPHA,
                    });
                }
            }
        }

        links
    }
}

pub fn rgba(alpha: f64) -> String {
    let (r, g, b) = PARTICLE_RGB;
    format!("rgba({r}, {g}, {b}, {:.3})", alpha.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(particles: Vec<Particle>) -> ParticleField {
        ParticleField {
            width: 200.0,
            height: 100.0,
            particles,
        }
    }

    fn still(x: f64, y: f64) -> Particle {
        Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            size: 3.0,
            opacity: 0.5,
        }
    }

    #[test]
    fn samples_stay_inside_their_ranges() {
        let mut samples = [0.0, 0.999].into_iter().cycle();
        let field = ParticleField::new(300.0, 150.0, 10, || samples.next().unwrap_or(0.5));

        assert_eq!(field.particles().len(), 10);
        for particle in field.particles() {
            assert!((0.0..=300.0).contains(&particle.x));
            assert!((0.0..=150.0).contains(&particle.y));
            assert!((-0.5..=0.5).contains(&particle.vx));
            assert!((2.0..=6.0).contains(&particle.size));
            assert!((0.3..=0.8).contains(&particle.opacity));
        }
    }

    #[test]
    fn particles_wrap_around_edges() {
        let mut field = field_of(vec![
            Particle {
                vx: -0.5,
                ..still(0.2, 50.0)
            },
            Particle {
                vy: 0.5,
                ..still(20.0, 99.8)
            },
        ]);

        field.step();

        assert_eq!(field.particles()[0].x, 200.0);
        assert_eq!(field.particles()[1].y, 0.0);
    }

    #[test]
    fn close_pairs_are_linked_with_fading_alpha() {
        let field = field_of(vec![still(0.0, 0.0), still(30.0, 40.0), still(190.0, 90.0)]);

        let links = field.links();

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].from, (0.0, 0.0));
        assert_eq!(links[0].to, (30.0, 40.0));
        assert!((links[0].alpha - 0.5 * 50.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn resize_moves_the_wrap_edges() {
        let mut field = field_of(vec![Particle {
            vx: 0.5,
            ..still(120.0, 10.0)
        }]);

        field.resize(100.0, 100.0);
        field.step();

        assert_eq!(field.size(), (100.0, 100.0));
        assert_eq!(field.particles()[0].x, 0.0);
    }

    #[test]
    fn rgba_uses_the_accent_color() {
        assert_eq!(rgba(0.5), "rgba(100, 255, 218, 0.500)");
    }
}
