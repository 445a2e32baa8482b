use super::{suitable_xfmt, TimeSeries};
use chrono::prelude::*;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// 12:5, like the 12x5 inch figures of the original plots
pub const CANVAS_SIZE: (u32, u32) = (1200, 500);
const LINE_COLOR: RGBColor = RGBColor(0, 0, 139);
const FONT: &str = "sans-serif";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl Default for ImageFormat {
    fn default() -> Self {
        ImageFormat::Png
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(format!("unsupported image format: {}", other)),
        }
    }
}

/// Texts drawn on the chart of one site
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLabels {
    pub title: String,
    pub legend: String,
    pub x_desc: String,
    pub y_desc: String,
}

impl ChartLabels {
    pub fn for_site(site: &str, pollutant: &str) -> ChartLabels {
        ChartLabels {
            title: format!("{} Time Series for {} (2 km radius)", pollutant, site),
            legend: format!("{} {} (kT/year)", site, pollutant),
            x_desc: String::from("Time"),
            y_desc: format!("{} Emissions (kT/year)", pollutant),
        }
    }
}

impl TimeSeries {
    /// splits the series at the NAN values, each segment is drawn as its own line
    pub fn valid_segments(&self) -> Vec<Vec<(NaiveDateTime, f64)>> {
        let mut segments = Vec::new();
        let mut current: Vec<(NaiveDateTime, f64)> = Vec::new();
        for (&t, &v) in self.time.iter().zip(self.value.iter()) {
            if v.is_nan() {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            } else {
                current.push((t, v));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    /// datetime axis limits with a 5% margin, never empty
    pub fn x_limits(&self) -> (NaiveDateTime, NaiveDateTime) {
        let (xmindt, xmaxdt) = self
            .time_range()
            .unwrap_or_else(|| (NaiveDateTime::default(), NaiveDateTime::default()));
        let xspan: chrono::Duration = xmaxdt - xmindt;
        let xmargin = if xspan > chrono::Duration::zero() {
            xspan / 20
        } else {
            chrono::Duration::days(1)
        };
        (xmindt - xmargin, xmaxdt + xmargin)
    }

    /// value axis limits with a 10% margin, never empty
    pub fn y_limits(&self) -> (f64, f64) {
        let (ymin, ymax) = self.value_range().unwrap_or((0., 1.));
        let yspan = ymax - ymin;
        let ymargin = if yspan > 0. {
            yspan / 10.
        } else if ymin != 0. {
            ymin.abs() / 10.
        } else {
            1.
        };
        (ymin - ymargin, ymax + ymargin)
    }

    /// plots the time series as a line chart to png or svg, overwriting fout
    pub fn plot_datetime(
        &self,
        fout: &Path,
        labels: &ChartLabels,
        format: ImageFormat,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(fout, CANVAS_SIZE).into_drawing_area();
                self.draw(root, labels)
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(fout, CANVAS_SIZE).into_drawing_area();
                self.draw(root, labels)
            }
        }
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: DrawingArea<DB, Shift>,
        labels: &ChartLabels,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        DB::ErrorType: 'static,
    {
        let (xmindt, xmaxdt) = self.x_limits();
        let xfmt = suitable_xfmt(xmaxdt - xmindt);
        let xminutc = Utc.from_utc_datetime(&xmindt);
        let xmaxutc = Utc.from_utc_datetime(&xmaxdt);
        let (ymin, ymax) = self.y_limits();

        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(labels.title.as_str(), (FONT, 26))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(xminutc..xmaxutc, ymin..ymax)?;
        chart
            .configure_mesh()
            .light_line_style(&RGBColor(235, 235, 235))
            .bold_line_style(RGBColor(200, 200, 200).stroke_width(1))
            .label_style((FONT, 16))
            .x_desc(labels.x_desc.as_str())
            .y_desc(labels.y_desc.as_str())
            .x_labels(12)
            .x_label_formatter(&|x: &DateTime<Utc>| x.format(xfmt).to_string())
            .y_label_formatter(&|y: &f64| format!("{:.2}", y))
            .draw()?;

        let mut segments = self.valid_segments();
        if segments.is_empty() {
            // keeps the legend entry on charts without data
            segments.push(Vec::new());
        }
        for (i, segment) in segments.into_iter().enumerate() {
            let line = LineSeries::new(
                segment
                    .into_iter()
                    .map(|(t, v)| (Utc.from_utc_datetime(&t), v)),
                LINE_COLOR.stroke_width(2),
            );
            let drawn = chart.draw_series(line)?;
            if i == 0 {
                drawn
                    .label(labels.legend.as_str())
                    .legend(|(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], LINE_COLOR.stroke_width(2))
                    });
            }
        }
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font((FONT, 16))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}
