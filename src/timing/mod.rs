use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Debounce de callbacks: cada chamada cancela o timer pendente e arma um
/// novo, então só a última chamada de uma rajada executa, `delay` depois dela.
///
/// No modo `immediate`, a primeira chamada da rajada executa na hora e as
/// seguintes apenas rearmam o timer (que ao disparar libera o modo imediato
/// de novo). Requer um runtime tokio ativo.
pub struct Debouncer
{
    delay: Duration,
    immediate: bool,
    invoked: Arc<AtomicBool>,
    timer: Option<JoinHandle<()>>,
}

impl Debouncer
{
    pub fn new(delay: Duration) -> Self
    {
        Debouncer {
            delay,
            immediate: false,
            invoked: Arc::new(AtomicBool::new(false)),
            timer: None,
        }
    }

    /// Variante que dispara já na primeira chamada da rajada.
    pub fn immediate(delay: Duration) -> Self
    {
        Debouncer {
            immediate: true,
            ..Debouncer::new(delay)
        }
    }

    pub fn call<F>(&mut self, func: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Some(timer) = self.timer.take()
        {
            timer.abort();
        }

        if self.immediate && !self.invoked.load(Ordering::SeqCst)
        {
            self.invoked.store(true, Ordering::SeqCst);
            func();
            return;
        }

        let delay = self.delay;
        let invoked = Arc::clone(&self.invoked);
        self.timer = Some(tokio::spawn(async move {
            sleep(delay).await;
            func();
            invoked.store(false, Ordering::SeqCst);
        }));
    }

    /// Cancela o timer pendente e zera o estado do modo imediato.
    pub fn cancel(&mut self)
    {
        if let Some(timer) = self.timer.take()
        {
            timer.abort();
        }
        self.invoked.store(false, Ordering::SeqCst);
    }
}

/// Throttle de callbacks: no máximo uma execução por `interval`.
///
/// `leading` controla se a primeira chamada da janela executa na hora;
/// `trailing` agenda uma última execução para chamadas que chegaram no meio
/// da janela. Requer um runtime tokio ativo.
pub struct Throttler
{
    interval: Duration,
    leading: bool,
    trailing: bool,
    last_fire: Arc<Mutex<Option<Instant>>>,
    timer: Option<JoinHandle<()>>,
}

impl Throttler
{
    pub fn new(interval: Duration) -> Self
    {
        Throttler {
            interval,
            leading: true,
            trailing: false,
            last_fire: Arc::new(Mutex::new(None)),
            timer: None,
        }
    }

    pub fn leading(mut self, leading: bool) -> Self
    {
        self.leading = leading;
        self
    }

    pub fn trailing(mut self, trailing: bool) -> Self
    {
        self.trailing = trailing;
        self
    }

    pub fn call<F>(&mut self, func: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let now = Instant::now();

        let mut last_fire = self.last_fire.lock().unwrap();
        if last_fire.is_none() && !self.leading
        {
            // sem leading, a janela começa a contar da primeira chamada
            *last_fire = Some(now);
        }

        let remaining = match *last_fire
        {
            Some(last) => self.interval.saturating_sub(now - last),
            None => Duration::ZERO,
        };

        if remaining.is_zero()
        {
            *last_fire = Some(now);
            drop(last_fire);

            if let Some(timer) = self.timer.take()
            {
                timer.abort();
            }
            func();
            return;
        }
        drop(last_fire);

        let pending = self.timer.as_ref().map(|t| !t.is_finished()).unwrap_or(false);
        if self.trailing && !pending
        {
            let last_fire = Arc::clone(&self.last_fire);
            self.timer = Some(tokio::spawn(async move {
                sleep(remaining).await;
                *last_fire.lock().unwrap() = Some(Instant::now());
                func();
            }));
        }
    }

    /// Descarta a execução pendente e reabre a janela.
    pub fn cancel(&mut self)
    {
        if let Some(timer) = self.timer.take()
        {
            timer.abort();
        }
        *self.last_fire.lock().unwrap() = None;
    }
}

#[cfg(test)]
mod tests
{
    use std::sync::atomic::AtomicUsize;

    use super::*;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> usize)
    {
        let count = Arc::new(AtomicUsize::new(0));
        let reader = Arc::clone(&count);
        (count, move || reader.load(Ordering::SeqCst))
    }

    fn bump(count: &Arc<AtomicUsize>) -> impl FnOnce() + Send + 'static
    {
        let count = Arc::clone(count);
        move || {
            count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn debounce_runs_only_last_call()
    {
        let (count, read) = counter();
        let mut debouncer = Debouncer::new(Duration::from_millis(50));

        for _ in 0..5
        {
            debouncer.call(bump(&count));
            sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(read(), 0); // ainda dentro da janela

        sleep(Duration::from_millis(200)).await;
        assert_eq!(read(), 1);
    }

    #[tokio::test]
    async fn immediate_debounce_fires_first_call()
    {
        let (count, read) = counter();
        let mut debouncer = Debouncer::immediate(Duration::from_millis(50));

        debouncer.call(bump(&count));
        assert_eq!(read(), 1); // disparo síncrono

        debouncer.call(bump(&count));
        debouncer.call(bump(&count));
        sleep(Duration::from_millis(200)).await;
        assert_eq!(read(), 2); // rajada vira um único disparo atrasado
    }

    #[tokio::test]
    async fn cancel_discards_pending_debounce()
    {
        let (count, read) = counter();
        let mut debouncer = Debouncer::new(Duration::from_millis(50));

        debouncer.call(bump(&count));
        debouncer.cancel();

        sleep(Duration::from_millis(200)).await;
        assert_eq!(read(), 0);
    }

    #[tokio::test]
    async fn throttle_limits_burst_to_one_leading_call()
    {
        let (count, read) = counter();
        let mut throttler = Throttler::new(Duration::from_millis(100));

        for _ in 0..5
        {
            throttler.call(bump(&count));
        }
        assert_eq!(read(), 1); // só a chamada de abertura da janela

        sleep(Duration::from_millis(150)).await;
        throttler.call(bump(&count));
        assert_eq!(read(), 2); // nova janela, novo disparo
    }

    #[tokio::test]
    async fn trailing_throttle_flushes_last_call()
    {
        let (count, read) = counter();
        let mut throttler = Throttler::new(Duration::from_millis(80)).trailing(true);

        throttler.call(bump(&count)); // leading
        throttler.call(bump(&count)); // fica agendada para o fim da janela
        assert_eq!(read(), 1);

        sleep(Duration::from_millis(250)).await;
        assert_eq!(read(), 2);
    }
}
