//! 50 Hz servo PWM on TIM3 using direct PAC register access.
//!
//! Configures the timer for edge-aligned PWM with a 1 µs tick (20 ms frame,
//! so duty counts are microseconds) and hands out per-channel duty handles.
//! Assumes the reset clock tree: 16 MHz HSI with the APB1 prescaler at 1.

use embedded_hal::PwmPin;
use stm32f7xx_hal::pac;

/// Prescaler for a 1 µs tick: 16 MHz / (15 + 1).
const PSC_1US_TICK: u32 = 15;

/// Auto-reload for a 20 ms frame at the 1 µs tick.
const ARR_20MS: u32 = 19_999;

/// CCMR1: PWM mode 1 with preload enable on CH1 and CH2.
const CCMR1_PWM1_BOTH: u32 = 0x6868;

/// TIM3 configured as a two-channel servo PWM source.
pub struct ServoPwm {
    tim: pac::TIM3,
}

impl ServoPwm {
    /// Configure TIM3 for 50 Hz edge-aligned PWM on CH1/CH2.
    ///
    /// The matching pins (PA6/PA7, AF2) are set up by `BoardPins`.
    pub fn tim3(tim3: pac::TIM3) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim3en().set_bit());

        let tim = tim3;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        // 1 µs tick, 20 ms frame
        tim.psc.write(|w| unsafe { w.bits(PSC_1US_TICK) });
        tim.arr.write(|w| unsafe { w.bits(ARR_20MS) });

        // CH1/CH2 as PWM mode 1 outputs with duty preload
        tim.ccmr1_output().write(|w| unsafe { w.bits(CCMR1_PWM1_BOTH) });

        // Enable both outputs, active high
        tim.ccer.modify(|_, w| w.cc1e().set_bit().cc2e().set_bit());

        // No pulse until a channel gets its first duty
        tim.ccr1().write(|w| unsafe { w.bits(0) });
        tim.ccr2().write(|w| unsafe { w.bits(0) });

        // Latch prescaler and auto-reload, then run with ARR preload
        tim.egr.write(|w| w.ug().set_bit());
        tim.cr1.modify(|_, w| w.arpe().set_bit().cen().set_bit());

        Self { tim }
    }

    /// Hand out the two channel handles.
    pub fn split(self) -> (PwmChannel<1>, PwmChannel<2>) {
        (PwmChannel::<1>, PwmChannel::<2>)
    }

    /// Consume the wrapper and return the underlying timer peripheral.
    #[inline]
    pub fn free(self) -> pac::TIM3 {
        self.tim
    }
}

/// Duty handle for one TIM3 output channel.
///
/// Each handle only touches its own compare register and enable bit, so the
/// two channels can live in different owners.
pub struct PwmChannel<const CH: u8>;

impl<const CH: u8> PwmChannel<CH> {
    #[inline]
    fn tim() -> &'static pac::tim3::RegisterBlock {
        unsafe { &*pac::TIM3::ptr() }
    }
}

impl<const CH: u8> PwmPin for PwmChannel<CH> {
    type Duty = u16;

    fn disable(&mut self) {
        let tim = Self::tim();
        match CH {
            1 => tim.ccer.modify(|_, w| w.cc1e().clear_bit()),
            _ => tim.ccer.modify(|_, w| w.cc2e().clear_bit()),
        }
    }

    fn enable(&mut self) {
        let tim = Self::tim();
        match CH {
            1 => tim.ccer.modify(|_, w| w.cc1e().set_bit()),
            _ => tim.ccer.modify(|_, w| w.cc2e().set_bit()),
        }
    }

    fn get_duty(&self) -> u16 {
        let tim = Self::tim();
        let ccr = match CH {
            1 => tim.ccr1().read().bits(),
            _ => tim.ccr2().read().bits(),
        };
        ccr as u16
    }

    /// One more than the auto-reload: 20 000 counts, one per µs.
    fn get_max_duty(&self) -> u16 {
        (Self::tim().arr.read().bits() as u16).wrapping_add(1)
    }

    fn set_duty(&mut self, duty: u16) {
        let tim = Self::tim();
        match CH {
            1 => tim.ccr1().write(|w| unsafe { w.bits(u32::from(duty)) }),
            _ => tim.ccr2().write(|w| unsafe { w.bits(u32::from(duty)) }),
        }
    }
}
