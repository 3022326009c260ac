mod bitmap;
mod capture;
mod compositor;
mod error;
mod pdf;
mod planner;
mod region;
mod types;
mod whitespace;
mod writer;

pub use bitmap::BitmapImage;
pub use capture::{AccessGate, BlockRole, CaptureOptions, ContentBlock, ContentTree, RasterCapture};
pub use compositor::{PageSlice, compose, plan_slices};
pub use error::ExportError;
pub use pdf::{PdfWriter, PdfWriterFactory};
pub use planner::{BreakPlan, plan_breaks};
pub use region::{DocumentRegion, RegionProvider, locate_regions};
pub use types::{Color, Mm, PageLayout};
pub use whitespace::{BreakHeuristics, find_whitespace_break};
pub use writer::{DocumentWriter, PageFormat, TextAlign, TextStyle, WriterFactory};

use chrono::NaiveDate;
use log::{debug, info};
use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex, PoisonError};

// Page-1 header chrome: brand mark (or its text fallback), subtitle, and
// the job's title, URL and generation timestamp.
#[derive(Debug, Clone)]
pub struct HeaderSpec {
    pub brand_image: Option<image::RgbaImage>,
    pub brand_text: String,
    pub subtitle: String,
}

impl Default for HeaderSpec {
    fn default() -> Self {
        Self {
            brand_image: None,
            brand_text: "pagepress".to_string(),
            subtitle: "Analysis report".to_string(),
        }
    }
}

// Per-page footer chrome: separator rule, attribution, page numbers.
#[derive(Debug, Clone)]
pub struct FooterSpec {
    pub attribution: String,
    pub rule_color: Color,
}

impl Default for FooterSpec {
    fn default() -> Self {
        Self {
            attribution: "Generated with pagepress".to_string(),
            rule_color: Color::rgb(0.78, 0.78, 0.78),
        }
    }
}

// The analyzed URL supplies the hostname used in the output filename.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub report_id: String,
    pub report_type: String,
    pub report_title: String,
    pub analyzed_url: String,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub page_count: usize,
    pub content_height: Mm,
}

struct InFlight {
    outcome: Mutex<Option<Result<ExportSummary, ExportError>>>,
    done: Condvar,
}

impl InFlight {
    fn new() -> Self {
        Self {
            outcome: Mutex::new(None),
            done: Condvar::new(),
        }
    }

    fn wait(&self) -> Result<ExportSummary, ExportError> {
        let mut guard = self
            .outcome
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(outcome) = guard.as_ref() {
                return outcome.clone();
            }
            guard = self
                .done
                .wait(guard)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn complete(&self, outcome: Result<ExportSummary, ExportError>) {
        let mut guard = self
            .outcome
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(outcome);
        self.done.notify_all();
    }
}

// Export entry point. Owns the collaborators and the per-surface
// in-flight guard: a second caller while an export is running joins it
// and receives the same outcome instead of triggering a second capture.
pub struct ReportExporter {
    format: PageFormat,
    layout: PageLayout,
    heuristics: BreakHeuristics,
    capture_options: CaptureOptions,
    header: HeaderSpec,
    footer: FooterSpec,
    capture: Option<Arc<dyn RasterCapture>>,
    writer_factory: Option<Arc<dyn WriterFactory>>,
    access_gate: Option<Arc<dyn AccessGate>>,
    in_flight: Mutex<Option<Arc<InFlight>>>,
}

pub struct ReportExporterBuilder {
    format: PageFormat,
    layout: Option<PageLayout>,
    heuristics: BreakHeuristics,
    capture_options: CaptureOptions,
    header: HeaderSpec,
    footer: FooterSpec,
    capture: Option<Arc<dyn RasterCapture>>,
    writer_factory: Option<Arc<dyn WriterFactory>>,
    access_gate: Option<Arc<dyn AccessGate>>,
}

impl ReportExporter {
    pub fn builder() -> ReportExporterBuilder {
        ReportExporterBuilder {
            format: PageFormat::A4,
            layout: None,
            heuristics: BreakHeuristics::default(),
            capture_options: CaptureOptions::default(),
            header: HeaderSpec::default(),
            footer: FooterSpec::default(),
            capture: None,
            writer_factory: None,
            access_gate: None,
        }
    }

    // Runs one export, or joins the one already in flight.
    pub fn export(&self, job: &ExportJob, content: &ContentTree) -> Result<ExportSummary, ExportError> {
        let handle = {
            let mut slot = self
                .in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(running) = slot.as_ref() {
                let running = running.clone();
                drop(slot);
                debug!("joining in-flight export for {}", job.report_id);
                return running.wait();
            }
            let handle = Arc::new(InFlight::new());
            *slot = Some(handle.clone());
            handle
        };

        let outcome = self.run_export(job, content);
        handle.complete(outcome.clone());
        let mut slot = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = None;
        outcome
    }

    fn run_export(&self, job: &ExportJob, content: &ContentTree) -> Result<ExportSummary, ExportError> {
        if let Some(gate) = &self.access_gate {
            if !gate.has_export_access(&job.report_id) {
                return Err(ExportError::AccessDenied);
            }
        }
        let capture = self
            .capture
            .as_ref()
            .ok_or(ExportError::CaptureUnavailable)?;
        let factory = self
            .writer_factory
            .as_ref()
            .ok_or(ExportError::WriterUnavailable)?;

        info!(
            "exporting {} report for {}",
            job.report_type, job.analyzed_url
        );
        if !self.capture_options.settle_delay.is_zero() {
            std::thread::sleep(self.capture_options.settle_delay);
        }
        let pixels = capture.capture(content, &self.capture_options)?;
        let bitmap = BitmapImage::for_layout(pixels, &self.layout)?;
        let regions = content.keep_together_regions(bitmap.scale());
        let total = bitmap.content_height();
        let plan = plan_breaks(total, &regions, &self.layout, Some(&bitmap), &self.heuristics)?;
        let slices = plan_slices(&bitmap, &plan, &self.layout);

        let mut writer = factory.new_document(self.format);
        self.stamp_header(writer.as_mut(), job)?;
        compose(&bitmap, &slices, writer.as_mut())?;
        self.stamp_footers(writer.as_mut());

        let filename = export_filename(
            &job.report_type,
            &job.analyzed_url,
            chrono::Local::now().date_naive(),
        );
        let path = job.output_dir.join(filename);
        writer.save(&path)?;
        let page_count = writer.page_count();
        info!("saved {} pages to {}", page_count, path.display());
        Ok(ExportSummary {
            path,
            page_count,
            content_height: total,
        })
    }

    // Stamped before any content image so content placement can assume
    // the header's height is already consumed.
    fn stamp_header(&self, writer: &mut dyn DocumentWriter, job: &ExportJob) -> Result<(), ExportError> {
        let left = self.layout.margin;
        let right = self.layout.page_width - self.layout.margin;
        let top = self.layout.margin;

        match &self.header.brand_image {
            Some(mark) if mark.width() > 0 && mark.height() > 0 => {
                let height = Mm::from_f32(8.0);
                let width = height * (mark.width() as f32 / mark.height() as f32);
                writer.place_image(mark, left, top, width, height)?;
            }
            _ => {
                writer.draw_text(
                    &self.header.brand_text,
                    left,
                    top + Mm::from_f32(6.0),
                    &TextStyle::bold(14.0),
                    TextAlign::Left,
                );
            }
        }
        writer.draw_text(
            &self.header.subtitle,
            left,
            top + Mm::from_f32(12.0),
            &TextStyle::new(9.0).with_color(Color::rgb(0.45, 0.45, 0.45)),
            TextAlign::Left,
        );
        writer.draw_text(
            &job.report_title,
            left,
            top + Mm::from_f32(20.0),
            &TextStyle::bold(12.0),
            TextAlign::Left,
        );
        writer.draw_text(
            &job.analyzed_url,
            left,
            top + Mm::from_f32(26.0),
            &TextStyle::new(9.0),
            TextAlign::Left,
        );
        let stamp = chrono::Local::now().format("Generated %Y-%m-%d %H:%M");
        writer.draw_text(
            &stamp.to_string(),
            right,
            top + Mm::from_f32(26.0),
            &TextStyle::new(8.0).with_color(Color::rgb(0.45, 0.45, 0.45)),
            TextAlign::Right,
        );
        Ok(())
    }

    // Runs after composition because the page count is only known once
    // all slices are placed.
    fn stamp_footers(&self, writer: &mut dyn DocumentWriter) {
        let total = writer.page_count();
        let left = self.layout.margin;
        let right = self.layout.page_width - self.layout.margin;
        let rule_y = self.layout.page_height - self.layout.margin - self.layout.footer_height;
        let baseline = rule_y + Mm::from_f32(5.0);
        let style = TextStyle::new(8.0).with_color(Color::rgb(0.45, 0.45, 0.45));
        for page in 1..=total {
            writer.set_page(page);
            writer.draw_line((left, rule_y), (right, rule_y), 0.4, self.footer.rule_color);
            writer.draw_text(&self.footer.attribution, left, baseline, &style, TextAlign::Left);
            writer.draw_text(
                &format!("Page {} of {}", page, total),
                right,
                baseline,
                &style,
                TextAlign::Right,
            );
        }
    }
}

impl ReportExporterBuilder {
    pub fn page_format(mut self, format: PageFormat) -> Self {
        self.format = format;
        self
    }

    pub fn layout(mut self, layout: PageLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn heuristics(mut self, heuristics: BreakHeuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    pub fn capture_options(mut self, options: CaptureOptions) -> Self {
        self.capture_options = options;
        self
    }

    pub fn header(mut self, header: HeaderSpec) -> Self {
        self.header = header;
        self
    }

    pub fn footer(mut self, footer: FooterSpec) -> Self {
        self.footer = footer;
        self
    }

    pub fn capture(mut self, capture: Arc<dyn RasterCapture>) -> Self {
        self.capture = Some(capture);
        self
    }

    pub fn writer_factory(mut self, factory: Arc<dyn WriterFactory>) -> Self {
        self.writer_factory = Some(factory);
        self
    }

    pub fn access_gate(mut self, gate: Arc<dyn AccessGate>) -> Self {
        self.access_gate = Some(gate);
        self
    }

    pub fn build(self) -> ReportExporter {
        let layout = self.layout.unwrap_or_else(|| self.format.layout());
        ReportExporter {
            format: self.format,
            layout,
            heuristics: self.heuristics,
            capture_options: self.capture_options,
            header: self.header,
            footer: self.footer,
            capture: self.capture,
            writer_factory: self.writer_factory,
            access_gate: self.access_gate,
            in_flight: Mutex::new(None),
        }
    }
}

// {report_type}-report-{hostname}-{date}.pdf, both variable parts
// sanitized for cross-platform filenames.
fn export_filename(report_type: &str, analyzed_url: &str, date: NaiveDate) -> String {
    let report_type = sanitize_component(report_type, "analysis");
    let hostname = sanitize_component(&hostname_of(analyzed_url), "site");
    format!("{}-report-{}-{}.pdf", report_type, hostname, date.format("%Y-%m-%d"))
}

fn hostname_of(url: &str) -> String {
    let rest = match url.find("://") {
        Some(index) => &url[index + 3..],
        None => url,
    };
    let host = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);
    host.to_ascii_lowercase()
}

fn sanitize_component(value: &str, fallback: &str) -> String {
    let cleaned: String = value
        .trim()
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '-',
            c if c.is_control() || c.is_whitespace() => '-',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim_matches(['-', '.']);
    if cleaned.is_empty() {
        fallback.to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct StubCapture {
        width: u32,
        height: u32,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl StubCapture {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        fn slow(width: u32, height: u32, delay: Duration) -> Self {
            Self {
                width,
                height,
                delay,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RasterCapture for StubCapture {
        fn capture(
            &self,
            _content: &ContentTree,
            _options: &CaptureOptions,
        ) -> Result<RgbaImage, ExportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
            let mut pixels = RgbaImage::new(self.width, self.height);
            for (x, y, pixel) in pixels.enumerate_pixels_mut() {
                let v = x.wrapping_mul(37).wrapping_add(y.wrapping_mul(101)) as u8;
                *pixel = Rgba([v, 20, 120, 255]);
            }
            Ok(pixels)
        }
    }

    struct FailingCapture;

    impl RasterCapture for FailingCapture {
        fn capture(
            &self,
            _content: &ContentTree,
            _options: &CaptureOptions,
        ) -> Result<RgbaImage, ExportError> {
            Err(ExportError::CaptureFailed("restricted content".to_string()))
        }
    }

    struct Gate(bool);

    impl AccessGate for Gate {
        fn has_export_access(&self, _report_id: &str) -> bool {
            self.0
        }
    }

    #[derive(Default)]
    struct RecordedPage {
        images: Vec<(i64, i64)>,
        texts: Vec<String>,
        lines: usize,
    }

    #[derive(Default)]
    struct Recorded {
        pages: Vec<RecordedPage>,
        saved_to: Option<PathBuf>,
    }

    struct RecordingWriter {
        shared: Arc<Mutex<Recorded>>,
        current: usize,
    }

    impl DocumentWriter for RecordingWriter {
        fn add_page(&mut self) {
            let mut doc = self.shared.lock().expect("lock");
            doc.pages.push(RecordedPage::default());
            self.current = doc.pages.len() - 1;
        }

        fn set_page(&mut self, page_number: usize) {
            self.current = page_number - 1;
        }

        fn place_image(
            &mut self,
            _pixels: &RgbaImage,
            _x: Mm,
            _y: Mm,
            width: Mm,
            height: Mm,
        ) -> Result<(), ExportError> {
            let mut doc = self.shared.lock().expect("lock");
            let current = self.current;
            doc.pages[current]
                .images
                .push((width.to_milli_i64(), height.to_milli_i64()));
            Ok(())
        }

        fn draw_text(
            &mut self,
            text: &str,
            _x: Mm,
            _baseline: Mm,
            _style: &TextStyle,
            _align: TextAlign,
        ) {
            let mut doc = self.shared.lock().expect("lock");
            let current = self.current;
            doc.pages[current].texts.push(text.to_string());
        }

        fn draw_line(&mut self, _from: (Mm, Mm), _to: (Mm, Mm), _width_pt: f32, _color: Color) {
            let mut doc = self.shared.lock().expect("lock");
            let current = self.current;
            doc.pages[current].lines += 1;
        }

        fn page_count(&self) -> usize {
            self.shared.lock().expect("lock").pages.len()
        }

        fn save(&mut self, path: &Path) -> Result<(), ExportError> {
            self.shared.lock().expect("lock").saved_to = Some(path.to_path_buf());
            Ok(())
        }
    }

    struct RecordingFactory {
        shared: Arc<Mutex<Recorded>>,
    }

    impl RecordingFactory {
        fn new() -> (Self, Arc<Mutex<Recorded>>) {
            let shared = Arc::new(Mutex::new(Recorded::default()));
            (
                Self {
                    shared: shared.clone(),
                },
                shared,
            )
        }
    }

    impl WriterFactory for RecordingFactory {
        fn new_document(&self, _format: PageFormat) -> Box<dyn DocumentWriter> {
            {
                let mut doc = self.shared.lock().expect("lock");
                doc.pages = vec![RecordedPage::default()];
                doc.saved_to = None;
            }
            Box::new(RecordingWriter {
                shared: self.shared.clone(),
                current: 0,
            })
        }
    }

    fn job() -> ExportJob {
        ExportJob {
            report_id: "report-1".to_string(),
            report_type: "seo".to_string(),
            report_title: "Quarterly audit".to_string(),
            analyzed_url: "https://www.example.com/landing".to_string(),
            output_dir: PathBuf::from("/tmp"),
        }
    }

    fn quick_options() -> CaptureOptions {
        CaptureOptions {
            settle_delay: Duration::ZERO,
            ..CaptureOptions::default()
        }
    }

    // Content width 200mm so a 400px capture is 2px per mm.
    fn test_layout() -> PageLayout {
        PageLayout {
            page_width: Mm::from_f32(210.0),
            page_height: Mm::from_f32(297.0),
            margin: Mm::from_f32(5.0),
            header_height: Mm::from_f32(42.0),
            footer_height: Mm::from_f32(12.0),
        }
    }

    #[test]
    fn access_denial_short_circuits_before_capture() {
        let capture = Arc::new(StubCapture::new(400, 1200));
        let (factory, _) = RecordingFactory::new();
        let exporter = ReportExporter::builder()
            .capture(capture.clone())
            .writer_factory(Arc::new(factory))
            .access_gate(Arc::new(Gate(false)))
            .capture_options(quick_options())
            .build();
        let err = exporter.export(&job(), &ContentTree::default()).expect_err("denied");
        assert_eq!(err, ExportError::AccessDenied);
        assert_eq!(capture.call_count(), 0);
    }

    #[test]
    fn missing_collaborators_fail_fast() {
        let (factory, shared) = RecordingFactory::new();
        let exporter = ReportExporter::builder()
            .writer_factory(Arc::new(factory))
            .capture_options(quick_options())
            .build();
        let err = exporter.export(&job(), &ContentTree::default()).expect_err("no capture");
        assert_eq!(err, ExportError::CaptureUnavailable);
        assert!(shared.lock().expect("lock").saved_to.is_none());

        let capture = Arc::new(StubCapture::new(400, 1200));
        let exporter = ReportExporter::builder()
            .capture(capture.clone())
            .capture_options(quick_options())
            .build();
        let err = exporter.export(&job(), &ContentTree::default()).expect_err("no writer");
        assert_eq!(err, ExportError::WriterUnavailable);
        assert_eq!(capture.call_count(), 0);
    }

    #[test]
    fn capture_rejection_propagates_without_saving() {
        let (factory, shared) = RecordingFactory::new();
        let exporter = ReportExporter::builder()
            .capture(Arc::new(FailingCapture))
            .writer_factory(Arc::new(factory))
            .capture_options(quick_options())
            .build();
        let err = exporter.export(&job(), &ContentTree::default()).expect_err("capture");
        assert!(matches!(err, ExportError::CaptureFailed(_)));
        assert!(shared.lock().expect("lock").saved_to.is_none());
    }

    #[test]
    fn export_stamps_header_once_and_footer_everywhere() {
        let (factory, shared) = RecordingFactory::new();
        let exporter = ReportExporter::builder()
            .layout(test_layout())
            .capture(Arc::new(StubCapture::new(400, 1200)))
            .writer_factory(Arc::new(factory))
            .capture_options(quick_options())
            .build();
        let summary = exporter.export(&job(), &ContentTree::default()).expect("export");
        assert_eq!(summary.content_height, Mm::from_f32(600.0));
        assert!(summary.page_count >= 2);

        let doc = shared.lock().expect("lock");
        assert_eq!(doc.pages.len(), summary.page_count);
        let first_texts = doc.pages[0].texts.join("\n");
        assert!(first_texts.contains("Quarterly audit"));
        assert!(first_texts.contains("https://www.example.com/landing"));
        assert!(first_texts.contains("pagepress"));
        for (index, page) in doc.pages.iter().enumerate() {
            assert_eq!(page.images.len(), 1, "page {} image count", index + 1);
            assert_eq!(page.lines, 1, "page {} separator", index + 1);
            let marker = format!("Page {} of {}", index + 1, doc.pages.len());
            assert!(
                page.texts.iter().any(|t| t == &marker),
                "page {} missing {:?}",
                index + 1,
                marker
            );
        }
        // Header text never repeats past page 1.
        for page in &doc.pages[1..] {
            assert!(page.texts.iter().all(|t| t != "Quarterly audit"));
        }
        let saved = doc.saved_to.as_ref().expect("saved");
        let name = saved.file_name().expect("name").to_string_lossy();
        assert!(name.starts_with("seo-report-example.com-"));
        assert!(name.ends_with(".pdf"));
    }

    #[test]
    fn short_content_yields_a_single_page() {
        let (factory, shared) = RecordingFactory::new();
        let exporter = ReportExporter::builder()
            .layout(test_layout())
            .capture(Arc::new(StubCapture::new(400, 300)))
            .writer_factory(Arc::new(factory))
            .capture_options(quick_options())
            .build();
        let summary = exporter.export(&job(), &ContentTree::default()).expect("export");
        assert_eq!(summary.page_count, 1);
        let doc = shared.lock().expect("lock");
        assert!(doc.pages[0].texts.iter().any(|t| t == "Page 1 of 1"));
    }

    #[test]
    fn keep_together_block_moves_the_first_break() {
        // Block spans 400..500px = 200..250mm, crossing the 238mm tentative
        // line for page 1; the first slice must stop at the block's top.
        let content = ContentTree::new(vec![ContentBlock::new(BlockRole::Table, 400, 500)]);
        let (factory, shared) = RecordingFactory::new();
        let exporter = ReportExporter::builder()
            .layout(test_layout())
            .capture(Arc::new(StubCapture::new(400, 1200)))
            .writer_factory(Arc::new(factory))
            .capture_options(quick_options())
            .build();
        exporter.export(&job(), &content).expect("export");
        let doc = shared.lock().expect("lock");
        assert_eq!(doc.pages[0].images[0].1, 200_000);
    }

    #[test]
    fn concurrent_callers_join_the_in_flight_export() {
        let capture = Arc::new(StubCapture::slow(400, 1200, Duration::from_millis(150)));
        let (factory, _) = RecordingFactory::new();
        let exporter = Arc::new(
            ReportExporter::builder()
                .layout(test_layout())
                .capture(capture.clone())
                .writer_factory(Arc::new(factory))
                .capture_options(quick_options())
                .build(),
        );
        let job = job();
        let content = ContentTree::default();
        let outcomes: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..2)
                .map(|index| {
                    let exporter = exporter.clone();
                    let job = job.clone();
                    let content = content.clone();
                    scope.spawn(move || {
                        // The second caller arrives while the first capture
                        // is still sleeping.
                        if index == 1 {
                            std::thread::sleep(Duration::from_millis(40));
                        }
                        exporter.export(&job, &content)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().expect("join")).collect()
        });
        assert_eq!(capture.call_count(), 1);
        let first = outcomes[0].as_ref().expect("ok");
        let second = outcomes[1].as_ref().expect("ok");
        assert_eq!(first, second);
    }

    #[test]
    fn sequential_exports_run_independently() {
        let capture = Arc::new(StubCapture::new(400, 1200));
        let (factory, _) = RecordingFactory::new();
        let exporter = ReportExporter::builder()
            .layout(test_layout())
            .capture(capture.clone())
            .writer_factory(Arc::new(factory))
            .capture_options(quick_options())
            .build();
        exporter.export(&job(), &ContentTree::default()).expect("first");
        exporter.export(&job(), &ContentTree::default()).expect("second");
        assert_eq!(capture.call_count(), 2);
    }

    #[test]
    fn filename_combines_type_hostname_and_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("date");
        assert_eq!(
            export_filename("seo", "https://www.Example.com/path?q=1", date),
            "seo-report-example.com-2024-03-09.pdf"
        );
        assert_eq!(
            export_filename("performance", "localhost:3000/dashboard", date),
            "performance-report-localhost-3000-2024-03-09.pdf"
        );
        assert_eq!(
            export_filename("", "https:///", date),
            "analysis-report-site-2024-03-09.pdf"
        );
    }
}
