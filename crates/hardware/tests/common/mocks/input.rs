use mockall::mock;
use retrobus_core::input::{InputSampler, JoyPort};

mock! {
    pub Sampler {}
    impl InputSampler for Sampler {
        fn sample_word(&self, port: JoyPort) -> u16;
    }
}

/// A sampler that reports `word` on every port, any number of times.
pub fn sampler_with(word: u16) -> MockSampler {
    let mut sampler = MockSampler::new();
    let _ = sampler.expect_sample_word().return_const(word);
    sampler
}
