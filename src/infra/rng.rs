/// Источник случайности для оффчейн-дилера.
///
/// Контракт сам случайность не генерирует: он видит только коммитменты.
/// Перемешивание колоды и ключи делает дилер на стороне оператора.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    fn fill_bytes(&mut self, dest: &mut [u8]);
}

//
// NATIVE ВАРИАНТ (НЕ wasm32): тут есть rand.
//
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        use rand::thread_rng;

        slice.shuffle(&mut thread_rng());
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        use rand::RngCore;

        rand::thread_rng().fill_bytes(dest);
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Одинаковый seed даёт одинаковые раздачи и ключи.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

#[cfg(not(target_arch = "wasm32"))]
impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed_bytes(seed: [u8; 32]) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::from_seed(seed),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        use rand::RngCore;
        self.inner.fill_bytes(dest);
    }
}
