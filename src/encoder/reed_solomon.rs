/// Reed-Solomon error correction for QR codes
/// QR codes use RS over GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
use std::sync::OnceLock;

const PRIMITIVE_POLY: u16 = 0x11D;

struct Tables {
    log: [u8; 256],
    exp: [u8; 255],
}

static TABLES: OnceLock<Tables> = OnceLock::new();

fn tables() -> &'static Tables {
    TABLES.get_or_init(|| {
        let mut log = [0u8; 256];
        let mut exp = [0u8; 255];
        let mut x: u16 = 1;
        for (i, slot) in exp.iter_mut().enumerate() {
            *slot = x as u8;
            log[x as usize] = i as u8;
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= PRIMITIVE_POLY;
            }
        }
        Tables { log, exp }
    })
}

/// GF(256) field operations using log/exp tables
pub struct Gf256;

impl Gf256 {
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let t = tables();
        let sum = t.log[a as usize] as usize + t.log[b as usize] as usize;
        t.exp[sum % 255]
    }

    /// alpha^n
    pub fn exp(n: usize) -> u8 {
        tables().exp[n % 255]
    }
}

/// Reed-Solomon encoder for one block length
pub struct ReedSolomonEncoder {
    /// Generator coefficients, highest power first, leading 1 omitted
    divisor: Vec<u8>,
}

impl ReedSolomonEncoder {
    /// Generator polynomial (x - a^0)(x - a^1)...(x - a^(degree-1))
    pub fn new(degree: usize) -> Self {
        assert!((1..=255).contains(&degree), "degree out of range");
        let mut divisor = vec![0u8; degree];
        divisor[degree - 1] = 1;

        let mut root = 1u8;
        for _ in 0..degree {
            for j in 0..degree {
                divisor[j] = Gf256::mul(divisor[j], root);
                if j + 1 < degree {
                    divisor[j] ^= divisor[j + 1];
                }
            }
            root = Gf256::mul(root, 0x02);
        }
        Self { divisor }
    }

    pub fn degree(&self) -> usize {
        self.divisor.len()
    }

    /// Remainder of data(x) * x^degree divided by the generator
    pub fn remainder(&self, data: &[u8]) -> Vec<u8> {
        let mut result = vec![0u8; self.divisor.len()];
        for &b in data {
            let factor = b ^ result[0];
            result.rotate_left(1);
            if let Some(last) = result.last_mut() {
                *last = 0;
            }
            for (r, &d) in result.iter_mut().zip(&self.divisor) {
                *r ^= Gf256::mul(d, factor);
            }
        }
        result
    }
}
