use crate::infra::ConfiguredSource;
use clap::Args;
use std::sync::Arc;
use student_housing::config::AppConfig;
use student_housing::error::AppError;
use student_housing::listings::{
    ListingFilter, ListingService, ListingSource, ListingSummaryView, ResidenceStyle,
};

#[derive(Args, Debug, Default)]
pub(crate) struct ListingSearchArgs {
    /// Case-insensitive text matched against name, description and style
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Residence style (traditional, traditional-plus, suite, studio, apartment, room, house)
    #[arg(long)]
    pub(crate) style: Option<ResidenceStyle>,
    /// Minimum normalized monthly price
    #[arg(long)]
    pub(crate) min_price: Option<u32>,
    /// Maximum normalized monthly price
    #[arg(long)]
    pub(crate) max_price: Option<u32>,
    /// Minimum bedroom count
    #[arg(long)]
    pub(crate) min_bedrooms: Option<u8>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

impl From<&ListingSearchArgs> for ListingFilter {
    fn from(args: &ListingSearchArgs) -> Self {
        ListingFilter {
            search: args
                .search
                .as_deref()
                .map(str::trim)
                .filter(|search| !search.is_empty())
                .map(str::to_string),
            style: args.style,
            min_price: args.min_price,
            max_price: args.max_price,
            min_bedrooms: args.min_bedrooms,
        }
    }
}

pub(crate) async fn run_listing_search(args: ListingSearchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let source = ConfiguredSource::from_config(&config.listings);
    let service = ListingService::new(Arc::new(source));
    let views = search_listings(&service, &args).await?;

    if args.json {
        match serde_json::to_string_pretty(&views) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => println!("Unable to render listings as JSON: {err}"),
        }
        return Ok(());
    }

    render_listing_table(&views);
    Ok(())
}

async fn search_listings<S>(
    service: &ListingService<S>,
    args: &ListingSearchArgs,
) -> Result<Vec<ListingSummaryView>, AppError>
where
    S: ListingSource + 'static,
{
    let records = service.search(&ListingFilter::from(args)).await?;
    Ok(records.iter().map(ListingSummaryView::from).collect())
}

fn render_listing_table(views: &[ListingSummaryView]) {
    if views.is_empty() {
        println!("No residences match the current filters.");
        return;
    }

    println!("{} residence(s) found", views.len());
    for view in views {
        println!(
            "- {:<28} {:<18} {:<9} {:>18}  [{}]",
            view.name,
            view.residence_style.label(),
            view.agreement_length,
            view.price_label.to_string(),
            view.tags.join(", ")
        );
    }
}
