//! Wiring: builds every module and starts its task.

use std::sync::Arc;

use platform::config::{
    BLACKOUT_HOLD, BLACKOUT_INTERVAL, BUSES_INTERVAL, CLOCK_INTERVAL, TIME_SYNC_INTERVAL,
    TRAINS_INTERVAL, WEATHER_INTERVAL,
};
use platform::{Gateway, InputDevice, LocalClock, Surface, TransitKind};

use crate::config::Settings;
use crate::modules::{Blackout, ClockModule, ControlPanel, TransitModule, WeatherModule};
use crate::scheduler::{spawn_periodic, FirstTick, TaskHandle};
use crate::time_sync::{Subscription, TimeSync};

/// The running display. Dropping it stops every task.
pub struct Dashboard<G: Gateway, S> {
    time_sync: Arc<TimeSync<G>>,
    panel: Arc<ControlPanel<G, S>>,
    weather_subscription: Option<Subscription>,
    tasks: Vec<TaskHandle>,
}

impl<G, S> Dashboard<G, S>
where
    G: Gateway,
    S: Surface + Clone + 'static,
{
    /// Build and start everything, in screen order: time sync, clock,
    /// weather, both departure boards, zones, blackout.
    ///
    /// Must be called inside a tokio runtime. With `input` set to `None` the
    /// zone panel only polls.
    pub fn start<C, I>(settings: &Settings, gateway: Arc<G>, surface: S, clock: C, input: Option<I>) -> Self
    where
        C: LocalClock + 'static,
        I: InputDevice,
    {
        let mut tasks = Vec::with_capacity(8);

        let time_sync = Arc::new(TimeSync::new(Arc::clone(&gateway), clock));
        tasks.push(spawn_periodic(
            "time-sync",
            TIME_SYNC_INTERVAL,
            FirstTick::Immediate,
            Arc::clone(&time_sync),
        ));

        let clock_face = ClockModule::new(Arc::clone(&time_sync), surface.clone(), settings.locale.clone());
        tasks.push(spawn_periodic("clock", CLOCK_INTERVAL, FirstTick::Immediate, Arc::new(clock_face)));

        let weather = Arc::new(WeatherModule::new(
            Arc::clone(&gateway),
            Arc::clone(&time_sync),
            surface.clone(),
            settings.forecast_columns,
        ));
        let weather_subscription = Some(weather.attach(&time_sync));
        tasks.push(spawn_periodic("weather", WEATHER_INTERVAL, FirstTick::Immediate, weather));

        for (kind, caption, period) in [
            (TransitKind::Buses, &settings.bus_caption, BUSES_INTERVAL),
            (TransitKind::Trains, &settings.train_caption, TRAINS_INTERVAL),
        ] {
            let board = TransitModule::new(
                Arc::clone(&gateway),
                surface.clone(),
                kind,
                caption.as_str(),
                settings.departure_rows,
            );
            tasks.push(spawn_periodic(kind.name(), period, FirstTick::Immediate, Arc::new(board)));
        }

        let panel = Arc::new(ControlPanel::new(Arc::clone(&gateway), surface.clone()));
        match input {
            Some(input) => {
                let started = panel.start(input);
                tasks.push(started.poll);
                tasks.push(started.input);
            }
            None => tasks.push(panel.start_polling()),
        }

        let blackout = Blackout::new(surface, BLACKOUT_HOLD);
        tasks.push(spawn_periodic(
            "blackout",
            BLACKOUT_INTERVAL,
            FirstTick::AfterPeriod,
            Arc::new(blackout),
        ));

        tracing::info!(tasks = tasks.len(), "dashboard started");
        Self {
            time_sync,
            panel,
            weather_subscription,
            tasks,
        }
    }
}

impl<G: Gateway, S> Dashboard<G, S> {
    /// The shared clock correction.
    pub fn time_sync(&self) -> &Arc<TimeSync<G>> {
        &self.time_sync
    }

    /// The zone panel, for activations from outside the input device.
    pub fn panel(&self) -> &Arc<ControlPanel<G, S>> {
        &self.panel
    }

    /// Names of the running tasks, in start order.
    pub fn task_names(&self) -> Vec<&'static str> {
        self.tasks.iter().map(TaskHandle::name).collect()
    }

    /// Stop every task and release the weather subscription.
    pub fn shutdown(self) {
        tracing::info!("dashboard stopping");
        drop(self);
    }
}

impl<G: Gateway, S> Drop for Dashboard<G, S> {
    fn drop(&mut self) {
        if let Some(subscription) = self.weather_subscription.take() {
            self.time_sync.unsubscribe(subscription);
        }
        self.tasks.clear();
    }
}
