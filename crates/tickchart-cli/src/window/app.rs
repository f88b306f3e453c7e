use eframe::egui;
use egui::{Align2, Button, Color32, ComboBox, RichText, TextEdit, Visuals};
use tickchart_core::window::BACKGROUND;
use tickchart_core::{paint_chart, ChartForm, ChartSession, ChartView, DataSource, Exchange, WindowSurface};
use tokio::runtime::Handle;

use super::loader::Loader;
use super::panel::FormPanel;

const LOAD_BUTTON: Color32 = Color32::from_rgb(0x4c, 0xaf, 0x50);

/// Chart form on top, the current chart below.
pub struct TickchartApp {
    panel: FormPanel,
    view: ChartView,
    loader: Loader,
}

impl TickchartApp {
    /// Build the window state and start loading `form` straight away.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        source: Box<dyn DataSource>,
        form: ChartForm,
        runtime: Handle,
    ) -> Self {
        cc.egui_ctx.set_visuals(dark_visuals());

        let view = ChartView::default();
        let surface = WindowSurface::new(view.clone()).with_context(cc.egui_ctx.clone());
        let mut app = Self {
            panel: FormPanel::new(form),
            view,
            loader: Loader::new(ChartSession::new(source, surface), runtime),
        };
        app.load(&cc.egui_ctx);
        app
    }

    fn load(&mut self, ctx: &egui::Context) {
        if let Some(form) = self.panel.start_load() {
            self.loader.spawn(form, ctx.clone());
        }
    }

    fn form_row(&mut self, ui: &mut egui::Ui) -> bool {
        let (can_load, loading) = (self.panel.can_load(), self.panel.is_loading());
        let form = &mut self.panel.form;
        ui.horizontal(|ui| {
            ui.label("Stock Ticker:");
            ui.add(TextEdit::singleline(&mut form.ticker).desired_width(100.0));

            ui.label("Exchange:");
            ComboBox::from_id_salt("exchange_combo")
                .selected_text(form.exchange.as_str())
                .show_ui(ui, |ui| {
                    for exchange in Exchange::ALL {
                        ui.selectable_value(
                            &mut form.exchange,
                            exchange.as_str().to_owned(),
                            exchange.as_str(),
                        );
                    }
                });

            ui.label("Start Date:");
            ui.add(TextEdit::singleline(&mut form.start).desired_width(90.0));
            ui.label("End Date:");
            ui.add(TextEdit::singleline(&mut form.end).desired_width(90.0));

            let button = Button::new(RichText::new("Load Chart").strong().color(Color32::WHITE))
                .fill(LOAD_BUTTON);
            let clicked = ui.add_enabled(can_load, button).clicked();
            if loading {
                ui.spinner();
            }
            clicked
        })
        .inner
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.panel.notice().cloned() else {
            return;
        };

        egui::Window::new(notice.title)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&notice.message);
                if ui.button("OK").clicked() {
                    self.panel.dismiss_notice();
                }
            });
    }
}

impl eframe::App for TickchartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Some(outcome) = self.loader.try_next() {
            self.panel.finish_load(outcome);
        }

        let requested = egui::TopBottomPanel::top("chart_form")
            .show(ctx, |ui| {
                ui.add_space(6.0);
                let requested = self.form_row(ui);
                ui.label(self.panel.status_line());
                requested
            })
            .inner;

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(BACKGROUND))
            .show(ctx, |ui| {
                let area = ui.max_rect();
                self.view.with_chart(|chart| match chart {
                    Some(chart) => paint_chart(ui.painter(), area, chart),
                    None => {
                        ui.centered_and_justified(|ui| ui.label("No chart loaded"));
                    }
                });
            });

        self.show_notice(ctx);

        if requested {
            self.load(ctx);
        }
    }
}

fn dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = BACKGROUND;
    visuals
}
